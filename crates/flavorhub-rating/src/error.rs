use thiserror::Error;

/// Errors from rating validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    /// The submitted value is outside the closed range `[1, 5]`.
    #[error("rating out of range: {value} (must be between {min} and {max})")]
    OutOfRange { value: i64, min: u8, max: u8 },
}

pub type RatingResult<T> = Result<T, RatingError>;
