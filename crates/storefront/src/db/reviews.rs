//! Review repository.

use sqlx::PgPool;

use shopsphere_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::review::Review;

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether a review already exists for this (user, product) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<bool, RepositoryError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user)
        .bind(product)
        .fetch_one(self.pool)
        .await?;

        Ok(exists.0)
    }

    /// Whether the user has a Delivered order item for this product.
    ///
    /// A Pending or Shipped order containing the product does not qualify;
    /// proof of delivery is what unlocks reviewing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_delivered_purchase(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<bool, RepositoryError> {
        let exists: (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS(
                SELECT 1
                FROM order_items oi
                JOIN orders o ON o.id = oi.order_id
                WHERE o.user_id = $1
                  AND oi.product_id = $2
                  AND o.status = 'Delivered'
            )
            ",
        )
        .bind(user)
        .bind(product)
        .fetch_one(self.pool)
        .await?;

        Ok(exists.0)
    }

    /// Create a review with the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a review already exists for the
    /// (user, product) pair (unique constraint).
    pub async fn create(
        &self,
        user: UserId,
        product: ProductId,
        rating: i32,
        comment: &str,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            r"
            INSERT INTO reviews (user_id, product_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, product_id, rating, comment, created_at
            ",
        )
        .bind(user)
        .bind(product)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("review already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(review)
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r"
            SELECT id, user_id, product_id, rating, comment, created_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(product)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Reviews written by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r"
            SELECT id, user_id, product_id, rating, comment, created_at
            FROM reviews
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }
}
