//! Review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use serde::Deserialize;

use shopsphere_core::ProductId;

use crate::db::reviews::ReviewRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::review::Review;
use crate::services::reviews::submit_review;
use crate::state::AppState;

/// Form data for a review submission.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Submit a review for a product.
///
/// Requires a Delivered order containing the product. A repeat submission
/// for the same product is answered with an informational message rather
/// than an error; see the error mapping.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
    Json(form): Json<ReviewForm>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = submit_review(
        state.pool(),
        user.id,
        product_id,
        form.rating,
        &form.comment,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// The user's own reviews, newest first.
pub async fn mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(reviews))
}
