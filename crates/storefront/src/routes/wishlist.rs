//! Wishlist route handlers.
//!
//! One wishlist per user; add and remove are idempotent.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shopsphere_core::ProductId;

use crate::db::products::ProductRepository;
use crate::db::wishlist::WishlistRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::product::Product;
use crate::state::AppState;

/// The user's wishlist, most recently added first.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Product>>> {
    let products = WishlistRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(products))
}

/// Add a product to the wishlist. Adding twice is a no-op.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    WishlistRepository::new(state.pool())
        .add(user.id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a product from the wishlist. Removing an absent entry is a no-op.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    WishlistRepository::new(state.pool())
        .remove(user.id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
