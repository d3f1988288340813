//! Order history and tracking route handlers.
//!
//! Customers read their own orders and tracking history; staff append
//! tracking updates through the privileged endpoint.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use shopsphere_core::{OrderId, TrackingStatus};

use crate::db::orders::OrderRepository;
use crate::db::tracking::TrackingRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireStaff};
use crate::models::order::{Order, OrderItem, TrackingEntry, TrackingUpdate};
use crate::services::tracking::append_update;
use crate::state::AppState;

/// Orders per history page.
const PAGE_SIZE: i64 = 20;

/// Query parameters for the order history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}

/// A page of the user's orders.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub page: u32,
}

/// An order with its item snapshots and tracking history.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub tracking: Vec<TrackingUpdate>,
}

/// Form data for a staff tracking update.
#[derive(Debug, Deserialize)]
pub struct TrackingForm {
    pub status: TrackingStatus,
    pub location: Option<String>,
}

/// List the user's orders, newest first.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<OrderListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let offset = i64::from(page - 1) * PAGE_SIZE;

    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id, PAGE_SIZE, offset)
        .await?;

    Ok(Json(OrderListResponse { orders, page }))
}

/// Show one of the user's orders with items and tracking, newest tracking
/// row first.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetailResponse>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let items = repo.items(id).await?;
    let tracking = TrackingRepository::new(state.pool()).history(id).await?;

    Ok(Json(OrderDetailResponse {
        order,
        items,
        tracking,
    }))
}

/// The tracking ledger for one of the user's orders, newest first.
pub async fn tracking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<TrackingUpdate>>> {
    OrderRepository::new(state.pool())
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let history = TrackingRepository::new(state.pool()).history(id).await?;
    Ok(Json(history))
}

/// Every tracking update across the user's orders, newest first.
pub async fn tracking_feed(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<TrackingEntry>>> {
    let entries = TrackingRepository::new(state.pool())
        .history_for_user(user.id)
        .await?;
    Ok(Json(entries))
}

/// Append a tracking update to any order. Staff only.
pub async fn append_tracking(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<OrderId>,
    Json(form): Json<TrackingForm>,
) -> Result<(StatusCode, Json<TrackingUpdate>)> {
    tracing::info!(order_id = %id, staff_id = %staff.id, "staff tracking update");

    let update = append_update(
        state.pool(),
        state.notifier(),
        id,
        form.status,
        form.location.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(update)))
}
