//! Staff account management command.
//!
//! Staff accounts are ordinary site accounts with the staff flag set; the
//! flag is what authorizes appending tracking updates to any order.
//!
//! # Usage
//!
//! ```bash
//! shopsphere-cli staff create -e staff@example.com -p <password>
//! ```

use sqlx::PgPool;
use thiserror::Error;

use shopsphere_storefront::services::auth::{AuthError, AuthService};

use super::migrate::MigrationError;

/// Errors that can occur during staff account operations.
#[derive(Debug, Error)]
pub enum StaffError {
    /// Environment or connection problem.
    #[error(transparent)]
    Setup(#[from] MigrationError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Registration failure (bad email, weak password, duplicate).
    #[error("Could not create account: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new staff account.
///
/// # Errors
///
/// Returns `StaffError` if the database is unreachable or the account
/// cannot be created.
pub async fn create(email: &str, password: &str) -> Result<(), StaffError> {
    let database_url = super::migrate::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let user = AuthService::new(&pool)
        .register_staff(email, password)
        .await?;

    tracing::info!(
        "Staff account created! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(())
}
