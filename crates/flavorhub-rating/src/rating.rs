use std::fmt;

use crate::error::{RatingError, RatingResult};

/// A single rating value, guaranteed to lie in `[Rating::MIN, Rating::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw submitted value.
    pub fn new(value: i64) -> RatingResult<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> RatingResult<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        f64::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_closed_range() {
        for v in 1..=5 {
            assert_eq!(Rating::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn rejects_outside_range() {
        for v in [0, 6, -1, i64::MIN, i64::MAX] {
            let err = Rating::new(v).unwrap_err();
            assert_eq!(err, RatingError::OutOfRange { value: v, min: 1, max: 5 });
        }
    }

    #[test]
    fn error_message_names_the_range() {
        let err = Rating::new(9).unwrap_err();
        assert_eq!(err.to_string(), "rating out of range: 9 (must be between 1 and 5)");
    }
}
