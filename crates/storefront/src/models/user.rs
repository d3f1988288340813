//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use shopsphere_core::{Email, UserId};

/// A registered storefront account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Staff accounts may append fulfillment tracking updates.
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}
