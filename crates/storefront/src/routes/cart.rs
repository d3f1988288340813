//! Cart route handlers.
//!
//! The cart lives in the session; these handlers mutate it in place and
//! return the resolved snapshot. Nothing here touches durable storage
//! except the read-only catalog lookups for the snapshot.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use shopsphere_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::{Cart, session_keys};
use crate::services::cart::{CartSnapshot, snapshot};
use crate::state::AppState;

/// Largest quantity one order item can store.
const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Form data for cart mutations.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Reject quantities that checkout could never persist.
fn validate_quantity(quantity: u32) -> Result<()> {
    if quantity > MAX_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_QUANTITY}"
        )));
    }
    Ok(())
}

/// Form data for removing a cart entry.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: ProductId,
}

/// The cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Load the cart from the session, defaulting to empty.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back into the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Show the cart resolved against the live catalog.
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartSnapshot>> {
    let cart = load_cart(&session).await;
    let snapshot = snapshot(state.pool(), &cart).await?;
    Ok(Json(snapshot))
}

/// Add a quantity of a product, merging into any existing entry.
///
/// The product must exist at add time; checkout re-validates under locks.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CartItemForm>,
) -> Result<Json<CartSnapshot>> {
    if form.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }
    validate_quantity(form.quantity)?;

    crate::db::products::ProductRepository::new(state.pool())
        .get(form.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(form.product_id, form.quantity);
    save_cart(&session, &cart).await?;

    let snapshot = snapshot(state.pool(), &cart).await?;
    Ok(Json(snapshot))
}

/// Set an entry's quantity; zero removes it.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CartItemForm>,
) -> Result<Json<CartSnapshot>> {
    validate_quantity(form.quantity)?;

    let mut cart = load_cart(&session).await;
    cart.set_quantity(form.product_id, form.quantity);
    save_cart(&session, &cart).await?;

    let snapshot = snapshot(state.pool(), &cart).await?;
    Ok(Json(snapshot))
}

/// Remove an entry unconditionally.
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RemoveForm>,
) -> Result<Json<CartSnapshot>> {
    let mut cart = load_cart(&session).await;
    cart.remove(form.product_id);
    save_cart(&session, &cart).await?;

    let snapshot = snapshot(state.pool(), &cart).await?;
    Ok(Json(snapshot))
}

/// The total item count, for the cart badge.
pub async fn count(session: Session) -> Json<CartCountResponse> {
    let cart = load_cart(&session).await;
    Json(CartCountResponse {
        count: cart.item_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
        assert!(validate_quantity(u32::MAX).is_err());
    }

    #[test]
    fn test_validate_quantity_rejection_is_a_client_error() {
        let err = validate_quantity(u32::MAX).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
