//! Wishlist repository.
//!
//! One wishlist per user, stored as a set of product references. Add and
//! remove are idempotent.

use sqlx::PgPool;

use shopsphere_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::product::Product;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to the user's wishlist. Adding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, user: UserId, product: ProductId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO wishlist_items (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            ",
        )
        .bind(user)
        .bind(product)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a product from the user's wishlist. Removing an absent product
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, user: UserId, product: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
            .bind(user)
            .bind(product)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// The products on the user's wishlist, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user: UserId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT p.id, p.name, p.category_id, p.price, p.description, p.image_url, p.created_at
            FROM products p
            JOIN wishlist_items w ON w.product_id = p.id
            WHERE w.user_id = $1
            ORDER BY w.added_at DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
