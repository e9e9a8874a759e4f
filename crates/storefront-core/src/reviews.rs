//! # Review Summary
//!
//! Rating statistics and filtering over the reviews embedded in a product
//! document.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  4.3  ★★★★☆   128 reviews                  │
//! │                                            │
//! │  5 ★ ████████████████░░░░  62%   ◄─ percentage(5)
//! │  4 ★ ██████░░░░░░░░░░░░░░  21%             │
//! │  3 ★ ██░░░░░░░░░░░░░░░░░░   9%             │
//! │  2 ★ █░░░░░░░░░░░░░░░░░░░   5%             │
//! │  1 ★ ░░░░░░░░░░░░░░░░░░░░   3%             │
//! └────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Review;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Aggregate rating numbers for the summary panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Mean of the clamped ratings, 0.0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: u32,
    /// Review count per star; index 0 holds 1-star reviews.
    pub distribution: [u32; 5],
}

impl ReviewStats {
    /// Computes stats over `reviews`. Ratings outside 1..=5 are clamped into
    /// range before counting.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut distribution = [0u32; 5];
        let mut sum = 0u64;

        for review in reviews {
            let rating = review.rating.clamp(MIN_RATING, MAX_RATING);
            distribution[usize::from(rating - MIN_RATING)] += 1;
            sum += u64::from(rating);
        }

        let total = distribution.iter().sum::<u32>();
        let average_rating = if total == 0 {
            0.0
        } else {
            sum as f64 / f64::from(total)
        };

        ReviewStats {
            average_rating,
            total_reviews: total,
            distribution,
        }
    }

    /// Number of reviews with `star` stars; 0 for stars outside 1..=5.
    pub fn count(&self, star: u8) -> u32 {
        if !(MIN_RATING..=MAX_RATING).contains(&star) {
            return 0;
        }
        self.distribution[usize::from(star - MIN_RATING)]
    }

    /// Share of reviews with `star` stars, in percent (0.0 - 100.0).
    pub fn percentage(&self, star: u8) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        f64::from(self.count(star)) * 100.0 / f64::from(self.total_reviews)
    }
}

/// Filter chips above the review list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    /// Only reviews with exactly this many stars.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Only reviews with a non-blank comment.
    #[serde(default)]
    pub with_description: bool,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(rating) = self.rating {
            if review.rating.clamp(MIN_RATING, MAX_RATING) != rating {
                return false;
            }
        }
        !self.with_description || !review.comment.trim().is_empty()
    }
}

/// Applies `filter` and orders the result newest first. Reviews without a
/// timestamp sort last, keeping their document order.
pub fn filter_reviews<'a>(reviews: &'a [Review], filter: &ReviewFilter) -> Vec<&'a Review> {
    let mut matched: Vec<&Review> = reviews.iter().filter(|r| filter.matches(r)).collect();
    // stable sort; None < Some so compare reversed
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn review(id: &str, rating: u8, comment: &str, day: Option<u32>) -> Review {
        Review {
            id: id.to_string(),
            product_id: "p1".to_string(),
            customer_name: "Sam".to_string(),
            rating,
            comment: comment.to_string(),
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_stats_for_no_reviews() {
        let stats = ReviewStats::from_reviews(&[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.percentage(5), 0.0);
    }

    #[test]
    fn test_stats_distribution_and_average() {
        let reviews = vec![
            review("r1", 5, "great", Some(1)),
            review("r2", 5, "", Some(2)),
            review("r3", 4, "good", Some(3)),
            review("r4", 2, "meh", Some(4)),
        ];
        let stats = ReviewStats::from_reviews(&reviews);

        assert_eq!(stats.total_reviews, 4);
        assert_eq!(stats.distribution, [0, 1, 0, 1, 2]);
        assert_eq!(stats.count(5), 2);
        assert_eq!(stats.average_rating, 4.0);
        assert_eq!(stats.percentage(5), 50.0);
        assert_eq!(stats.percentage(3), 0.0);
        assert_eq!(stats.count(9), 0);
    }

    #[test]
    fn test_out_of_range_ratings_are_clamped() {
        let reviews = vec![review("r1", 0, "", None), review("r2", 9, "", None)];
        let stats = ReviewStats::from_reviews(&reviews);

        assert_eq!(stats.distribution, [1, 0, 0, 0, 1]);
        assert_eq!(stats.average_rating, 3.0);
    }

    #[test]
    fn test_filter_by_rating_and_description() {
        let reviews = vec![
            review("r1", 5, "great", Some(1)),
            review("r2", 5, "   ", Some(2)),
            review("r3", 4, "good", Some(3)),
        ];

        let five_star = ReviewFilter {
            rating: Some(5),
            with_description: false,
        };
        let ids: Vec<&str> = filter_reviews(&reviews, &five_star)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r2", "r1"]);

        let described = ReviewFilter {
            rating: None,
            with_description: true,
        };
        let ids: Vec<&str> = filter_reviews(&reviews, &described)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r3", "r1"]);
    }

    #[test]
    fn test_undated_reviews_sort_last() {
        let reviews = vec![
            review("old", 3, "", Some(1)),
            review("undated", 3, "", None),
            review("new", 3, "", Some(20)),
        ];

        let ids: Vec<&str> = filter_reviews(&reviews, &ReviewFilter::default())
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }
}
