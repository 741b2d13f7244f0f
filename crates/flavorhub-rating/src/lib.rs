//! Rating aggregation for FlavorHub.
//!
//! A recipe's rating state is the pair `(averageRating, ratingCount)`. Each
//! accepted rating folds into that pair with the exact incremental mean:
//!
//! ```text
//! newAverage = (average * count + rating) / (count + 1)
//! newCount   = count + 1
//! ```
//!
//! Everything here is pure. Callers validate with [`Rating::new`] before any
//! store access, then apply the validated value to the state they read.

pub mod aggregator;
pub mod error;
pub mod rating;

pub use aggregator::{apply_rating, RatingExt};
pub use error::{RatingError, RatingResult};
pub use rating::Rating;
