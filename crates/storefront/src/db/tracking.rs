//! Tracking ledger repository.
//!
//! The ledger is append-only: rows are only ever inserted, each with a fresh
//! timestamp, and the newest-first ordering is the canonical read view.

use sqlx::{PgConnection, PgPool};

use shopsphere_core::{OrderId, TrackingStatus, UserId};

use super::RepositoryError;
use crate::models::order::{TrackingEntry, TrackingUpdate};

/// Repository for tracking ledger reads.
pub struct TrackingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrackingRepository<'a> {
    /// Create a new tracking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The full tracking history for one order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history(&self, order: OrderId) -> Result<Vec<TrackingUpdate>, RepositoryError> {
        let updates = sqlx::query_as::<_, TrackingUpdate>(
            r"
            SELECT id, order_id, status, location, updated_at
            FROM order_tracking
            WHERE order_id = $1
            ORDER BY updated_at DESC, id DESC
            ",
        )
        .bind(order)
        .fetch_all(self.pool)
        .await?;

        Ok(updates)
    }

    /// All tracking updates across a user's orders, newest first, joined to
    /// the parent order data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<TrackingEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, TrackingEntry>(
            r"
            SELECT t.id, t.order_id, t.status, t.location, t.updated_at,
                   o.status AS order_status,
                   o.total_price AS order_total,
                   o.created_at AS order_created_at
            FROM order_tracking t
            JOIN orders o ON o.id = t.order_id
            WHERE o.user_id = $1
            ORDER BY t.updated_at DESC, t.id DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}

/// Append one row to the tracking ledger.
///
/// Used both for the initial Processing row inside the checkout transaction
/// and for staff updates on a plain connection; prior rows are never touched.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_update(
    conn: &mut PgConnection,
    order: OrderId,
    status: TrackingStatus,
    location: Option<&str>,
) -> Result<TrackingUpdate, RepositoryError> {
    let update = sqlx::query_as::<_, TrackingUpdate>(
        r"
        INSERT INTO order_tracking (order_id, status, location)
        VALUES ($1, $2, $3)
        RETURNING id, order_id, status, location, updated_at
        ",
    )
    .bind(order)
    .bind(status)
    .bind(location)
    .fetch_one(&mut *conn)
    .await?;

    Ok(update)
}
