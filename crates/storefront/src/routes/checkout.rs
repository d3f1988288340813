//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;

use shopsphere_core::OrderId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Cart;
use crate::routes::cart::{load_cart, save_cart};
use crate::services::checkout::place_order;
use crate::state::AppState;

/// The placed order as returned to the client.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub total: Decimal,
}

/// Place an order from the session cart.
///
/// The cart is cleared only after the transaction commits; any failure
/// leaves it intact so the user can retry.
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let cart = load_cart(&session).await;

    let placed = place_order(state.pool(), state.notifier(), &user, &cart).await?;

    save_cart(&session, &Cart::new()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: placed.order_id,
            total: placed.total,
        }),
    ))
}
