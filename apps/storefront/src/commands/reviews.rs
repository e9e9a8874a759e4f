//! # Review Commands
//!
//! Rating summary and the filtered review list of the current product.

use serde::Serialize;
use storefront_core::reviews::filter_reviews;
use storefront_core::{Review, ReviewFilter, ReviewStats};

use crate::error::ApiError;
use crate::state::DetailsState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    /// Computed over every review, regardless of the filter
    pub stats: ReviewStats,
    pub reviews: Vec<Review>,
}

/// Returns rating stats and the reviews matching `filter`, newest first.
pub fn get_review_stats(
    details: &DetailsState,
    filter: &ReviewFilter,
) -> Result<ReviewsResponse, ApiError> {
    let snapshot = details.snapshot();
    let product = snapshot
        .product()
        .ok_or_else(|| ApiError::not_found("Product", "no product loaded"))?;

    Ok(ReviewsResponse {
        stats: ReviewStats::from_reviews(&product.reviews),
        reviews: filter_reviews(&product.reviews, filter)
            .into_iter()
            .cloned()
            .collect(),
    })
}
