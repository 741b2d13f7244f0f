use serde::{Deserialize, Serialize};

/// Summary of every rating ever submitted for one recipe.
///
/// `average_rating` is the arithmetic mean of exactly `rating_count` values,
/// each in `[1, 5]`. A recipe that has never been rated carries `(0.0, 0)`.
/// Both fields default when absent from stored or wire JSON, so records
/// written before ratings existed load as unrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAggregate {
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub rating_count: u64,
}

impl RatingAggregate {
    /// Create an aggregate from explicit values.
    pub fn new(average_rating: f64, rating_count: u64) -> Self {
        Self {
            average_rating,
            rating_count,
        }
    }

    /// The unrated state.
    pub const fn unrated() -> Self {
        Self {
            average_rating: 0.0,
            rating_count: 0,
        }
    }

    /// Returns `true` if no rating has been applied yet.
    pub fn is_unrated(&self) -> bool {
        self.rating_count == 0
    }

    /// Sum of all ratings represented by this aggregate.
    pub fn total(&self) -> f64 {
        self.average_rating * self.rating_count as f64
    }

    /// The average rounded to `decimals` places, for presentation only.
    pub fn rounded_average(&self, decimals: u32) -> f64 {
        let scale = 10f64.powi(decimals as i32);
        (self.average_rating * scale).round() / scale
    }
}
