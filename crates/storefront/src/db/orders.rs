//! Order repository: reads for order history plus the write primitives the
//! checkout workflow composes inside its transaction.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use shopsphere_core::{OrderId, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem};

/// Repository for order reads.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_price, status, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Get an order by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: OrderId,
        user: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_price, status, created_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_price, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// The item snapshots belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Transactional write primitives (used by services::checkout)
// =============================================================================

/// Insert a new order with a zero total placeholder.
///
/// The total is a placeholder so the order gets an identity before its item
/// subtotals are known; the workflow updates it before committing.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order(
    conn: &mut PgConnection,
    user: UserId,
) -> Result<Order, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(
        r"
        INSERT INTO orders (user_id, total_price, status)
        VALUES ($1, 0, 'Pending')
        RETURNING id, user_id, total_price, status, created_at
        ",
    )
    .bind(user)
    .fetch_one(&mut *conn)
    .await?;

    Ok(order)
}

/// Insert one order item snapshot.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_item(
    conn: &mut PgConnection,
    order: OrderId,
    product: ProductId,
    quantity: i32,
    unit_price: Decimal,
) -> Result<OrderItem, RepositoryError> {
    let item = sqlx::query_as::<_, OrderItem>(
        r"
        INSERT INTO order_items (order_id, product_id, quantity, unit_price)
        VALUES ($1, $2, $3, $4)
        RETURNING id, order_id, product_id, quantity, unit_price
        ",
    )
    .bind(order)
    .bind(product)
    .bind(quantity)
    .bind(unit_price)
    .fetch_one(&mut *conn)
    .await?;

    Ok(item)
}

/// Set an order's derived total.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the order does not exist.
pub async fn set_total(
    conn: &mut PgConnection,
    order: OrderId,
    total: Decimal,
) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE orders SET total_price = $1 WHERE id = $2")
        .bind(total)
        .bind(order)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
