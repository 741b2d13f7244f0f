use flavorhub_types::RatingAggregate;

use crate::error::RatingResult;
use crate::rating::Rating;

/// Fold a raw rating value into `current`.
///
/// Rejects values outside `[1, 5]` without touching the input. The returned
/// aggregate has `rating_count = current.rating_count + 1` and the exact
/// incremental mean; no rounding is applied.
pub fn apply_rating(current: &RatingAggregate, value: i64) -> RatingResult<RatingAggregate> {
    let rating = Rating::try_from(value)?;
    Ok(current.with_rating(rating))
}

/// Rating arithmetic on [`RatingAggregate`].
pub trait RatingExt {
    /// The aggregate after one more validated rating.
    fn with_rating(&self, rating: Rating) -> RatingAggregate;
}

impl RatingExt for RatingAggregate {
    fn with_rating(&self, rating: Rating) -> RatingAggregate {
        let count = self.rating_count as f64;
        let average = (self.total() + f64::from(rating)) / (count + 1.0);
        RatingAggregate {
            average_rating: average,
            rating_count: self.rating_count + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RatingError;
    use proptest::prelude::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn first_rating_sets_average() {
        let next = apply_rating(&RatingAggregate::unrated(), 5).unwrap();
        assert_eq!(next, RatingAggregate::new(5.0, 1));
    }

    #[test]
    fn absent_state_is_treated_as_unrated() {
        let absent = RatingAggregate::default();
        let next = apply_rating(&absent, 3).unwrap();
        assert_eq!(next.average_rating, 3.0);
        assert_eq!(next.rating_count, 1);
    }

    #[test]
    fn adds_to_existing_average() {
        let next = apply_rating(&RatingAggregate::new(4.5, 4), 3).unwrap();
        assert!(close(next.average_rating, 4.2, 1e-9));
        assert_eq!(next.rating_count, 5);
    }

    #[test]
    fn low_rating_pulls_average_down() {
        let next = apply_rating(&RatingAggregate::new(5.0, 2), 1).unwrap();
        assert!(close(next.average_rating, 3.6667, 1e-4));
        assert_eq!(next.rating_count, 3);
    }

    #[test]
    fn preserves_previous_ratings() {
        let next = apply_rating(&RatingAggregate::new(4.0, 2), 5).unwrap();
        assert!(close(next.average_rating, 13.0 / 3.0, 1e-12));
        assert_eq!(next.rating_count, 3);
    }

    #[test]
    fn same_ratings_keep_average() {
        let next = apply_rating(&RatingAggregate::new(3.0, 5), 3).unwrap();
        assert_eq!(next.average_rating, 3.0);
        assert_eq!(next.rating_count, 6);
    }

    #[test]
    fn repeated_rating_is_not_idempotent() {
        let once = apply_rating(&RatingAggregate::unrated(), 5).unwrap();
        let twice = apply_rating(&once, 5).unwrap();
        assert_eq!(once, RatingAggregate::new(5.0, 1));
        assert_eq!(twice, RatingAggregate::new(5.0, 2));
    }

    #[test]
    fn out_of_range_leaves_state_alone() {
        let current = RatingAggregate::new(4.0, 3);
        for bad in [0, 6, -1] {
            let err = apply_rating(&current, bad).unwrap_err();
            assert!(matches!(err, RatingError::OutOfRange { value, .. } if value == bad));
        }
        assert_eq!(current, RatingAggregate::new(4.0, 3));
    }

    #[test]
    fn each_rating_adds_its_value_to_the_total() {
        let mut agg = RatingAggregate::new(4.5, 4);
        for (value, total) in [(3i64, 21.0), (5, 26.0), (1, 27.0)] {
            agg = agg.with_rating(Rating::try_from(value).unwrap());
            assert!(close(agg.total(), total, 1e-9), "total {} != {total}", agg.total());
        }
        assert!(Rating::try_from(0i64).is_err());
    }

    proptest! {
        #[test]
        fn update_rule_is_exact(avg in 0.0f64..=5.0, count in 0u64..1_000_000, value in 1i64..=5) {
            let next = apply_rating(&RatingAggregate::new(avg, count), value).unwrap();
            let expected = (avg * count as f64 + value as f64) / (count as f64 + 1.0);
            prop_assert_eq!(next.rating_count, count + 1);
            prop_assert_eq!(next.average_rating, expected);
        }

        #[test]
        fn invalid_values_always_rejected(value in prop_oneof![i64::MIN..1i64, 6i64..i64::MAX]) {
            prop_assert!(apply_rating(&RatingAggregate::unrated(), value).is_err());
        }

        #[test]
        fn average_stays_within_bounds(ratings in prop::collection::vec(1i64..=5, 1..200)) {
            let mut agg = RatingAggregate::unrated();
            for r in &ratings {
                agg = apply_rating(&agg, *r).unwrap();
            }
            let mean = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;
            prop_assert_eq!(agg.rating_count, ratings.len() as u64);
            prop_assert!(agg.average_rating >= 1.0 && agg.average_rating <= 5.0);
            prop_assert!(close(agg.average_rating, mean, 1e-9));
        }
    }
}
