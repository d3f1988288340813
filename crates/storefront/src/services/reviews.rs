//! The review gate.
//!
//! A review may only be submitted by a user with proof of delivery for the
//! product, at most once per (user, product) pair. A repeat submission is an
//! expected case and is surfaced as an informational outcome, not a failure.

use sqlx::PgPool;
use thiserror::Error;

use shopsphere_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::reviews::ReviewRepository;
use crate::models::review::Review;

/// Valid rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Errors from review submission.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Rating outside the 1-5 range.
    #[error("rating must be between 1 and 5 (got {0})")]
    InvalidRating(i32),

    /// The user has no Delivered order item for this product. A Pending or
    /// Shipped order containing it does not qualify.
    #[error("you can only review products that have been delivered to you")]
    NotPurchased,

    /// A review for this (user, product) pair already exists. Informational:
    /// the existing review stands and no second row is created.
    #[error("you have already reviewed this product")]
    AlreadyReviewed,

    /// Database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Submit a review for a product.
///
/// # Errors
///
/// Returns [`ReviewError::InvalidRating`] for a rating outside 1..=5,
/// [`ReviewError::NotPurchased`] without a Delivered order item, or
/// [`ReviewError::AlreadyReviewed`] if the pair already has a review.
pub async fn submit_review(
    pool: &PgPool,
    user: UserId,
    product: ProductId,
    rating: i32,
    comment: &str,
) -> Result<Review, ReviewError> {
    validate_rating(rating)?;

    let repo = ReviewRepository::new(pool);

    if !repo.has_delivered_purchase(user, product).await? {
        return Err(ReviewError::NotPurchased);
    }

    // The unique constraint is the authority; this pre-check just makes the
    // common repeat-submission path cheap and race-free enough.
    if repo.exists(user, product).await? {
        return Err(ReviewError::AlreadyReviewed);
    }

    repo.create(user, product, rating, comment)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => ReviewError::AlreadyReviewed,
            other => ReviewError::Repository(other),
        })
}

/// Validate that a rating is an integer in [1, 5].
///
/// # Errors
///
/// Returns [`ReviewError::InvalidRating`] otherwise.
pub const fn validate_rating(rating: i32) -> Result<(), ReviewError> {
    if *RATING_RANGE.start() <= rating && rating <= *RATING_RANGE.end() {
        Ok(())
    } else {
        Err(ReviewError::InvalidRating(rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_accepts_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(3).is_ok());
        assert!(validate_rating(5).is_ok());
    }

    #[test]
    fn test_validate_rating_rejects_out_of_range() {
        assert!(matches!(validate_rating(0), Err(ReviewError::InvalidRating(0))));
        assert!(matches!(validate_rating(6), Err(ReviewError::InvalidRating(6))));
        assert!(matches!(validate_rating(-1), Err(ReviewError::InvalidRating(-1))));
    }
}
