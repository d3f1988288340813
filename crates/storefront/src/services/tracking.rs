//! Fulfillment tracking ledger operations.
//!
//! `append_update` is the explicit contract for staff status changes: it
//! always appends (never mutates) and its side effect - notifying the order
//! owner - is part of the method, not a hook buried in a persistence layer.
//! The notification is best-effort; its failure must never block the staff
//! action.

use sqlx::PgPool;
use thiserror::Error;

use shopsphere_core::{OrderId, TrackingStatus};

use crate::db::users::UserRepository;
use crate::db::{RepositoryError, orders::OrderRepository, tracking};
use crate::models::order::TrackingUpdate;
use crate::services::notifications::{self, NotificationSink};

/// Errors from tracking ledger operations.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The order does not exist.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// Database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Append a status/location update to an order's tracking ledger and notify
/// the order's owner.
///
/// The append always succeeds if the order exists; notification delivery is
/// attempted afterwards and any failure is logged and swallowed.
///
/// # Errors
///
/// Returns [`TrackingError::OrderNotFound`] for an unknown order, or
/// [`TrackingError::Repository`] on database failure.
pub async fn append_update(
    pool: &PgPool,
    notifier: &impl NotificationSink,
    order_id: OrderId,
    status: TrackingStatus,
    location: Option<&str>,
) -> Result<TrackingUpdate, TrackingError> {
    let order = OrderRepository::new(pool)
        .get(order_id)
        .await?
        .ok_or(TrackingError::OrderNotFound(order_id))?;

    let mut conn = pool.acquire().await.map_err(RepositoryError::from)?;
    let update = tracking::insert_update(&mut conn, order_id, status, location).await?;
    drop(conn);

    tracing::info!(
        order_id = %order_id,
        status = %status,
        "tracking update appended"
    );

    // The ledger row is already durable; a delivery failure only gets logged.
    match UserRepository::new(pool).email_of(order.user_id).await {
        Ok(recipient) => {
            let message =
                notifications::tracking_update(&recipient, order_id, status, location);
            if let Err(e) = notifier.send(&recipient, &message).await {
                tracing::warn!(
                    order_id = %order_id,
                    error = %e,
                    "tracking update notification failed (update remains appended)"
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                order_id = %order_id,
                error = %e,
                "could not resolve order owner for tracking notification"
            );
        }
    }

    Ok(update)
}
