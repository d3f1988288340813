//! Product review model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use shopsphere_core::{ProductId, ReviewId, UserId};

/// A product review.
///
/// At most one review exists per (user, product) pair, and a review may only
/// be created for products the user has received (a Delivered order item).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
