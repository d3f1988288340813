//! Catalog repository: products, categories, and option sets.

use sqlx::{PgConnection, PgPool};

use shopsphere_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::product::{Category, Color, Product, Size};

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, category_id, price, description, image_url, created_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List products, optionally filtered to one category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category: Option<CategoryId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, category_id, price, description, image_url, created_at
            FROM products
            WHERE ($1::int IS NULL OR category_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Fetch the products for a set of IDs.
    ///
    /// IDs with no matching product are silently absent from the result;
    /// callers decide whether a missing product is an error (checkout) or
    /// something to skip (cart snapshot).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, category_id, price, description, image_url, created_at
            FROM products
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories ORDER BY name")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    /// Sizes available for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sizes(&self, product: ProductId) -> Result<Vec<Size>, RepositoryError> {
        let sizes = sqlx::query_as::<_, Size>(
            r"
            SELECT s.id, s.name
            FROM sizes s
            JOIN product_sizes ps ON ps.size_id = s.id
            WHERE ps.product_id = $1
            ORDER BY s.id
            ",
        )
        .bind(product)
        .fetch_all(self.pool)
        .await?;

        Ok(sizes)
    }

    /// Colors available for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn colors(&self, product: ProductId) -> Result<Vec<Color>, RepositoryError> {
        let colors = sqlx::query_as::<_, Color>(
            r"
            SELECT c.id, c.name
            FROM colors c
            JOIN product_colors pc ON pc.color_id = c.id
            WHERE pc.product_id = $1
            ORDER BY c.id
            ",
        )
        .bind(product)
        .fetch_all(self.pool)
        .await?;

        Ok(colors)
    }
}

/// Lock a product row for the duration of the enclosing transaction and
/// return its current state.
///
/// `FOR UPDATE` serializes concurrent checkouts that reference the same
/// product, so the price read here cannot change before the transaction
/// commits. Must be called on a connection inside an open transaction;
/// the lock is released when that transaction ends.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lock_for_update(
    conn: &mut PgConnection,
    id: ProductId,
) -> Result<Option<Product>, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(
        r"
        SELECT id, name, category_id, price, description, image_url, created_at
        FROM products
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}
