//! The order placement workflow.
//!
//! Converts a session cart into a durable order inside one transaction:
//! lock each product row, snapshot its price into an order item, derive the
//! total server-side, and seed the tracking ledger with a Processing row.
//! Nothing persists unless every step succeeds; the confirmation mail goes
//! out only after the commit and can never undo it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use shopsphere_core::{OrderId, ProductId, TrackingStatus};

use crate::db::users::UserRepository;
use crate::db::{RepositoryError, orders, products, tracking};
use crate::models::product::Product;
use crate::models::{Cart, CurrentUser};
use crate::services::notifications::{self, NotificationSink, SummaryLine};

/// Errors from the checkout workflow.
///
/// Every variant except `Repository` is a user-recoverable outcome: the
/// transaction has been rolled back and the cart left intact for retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no entries; no order is created.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart entry references a product that no longer exists.
    /// The whole order is rolled back - no partial order is left behind.
    #[error("product {0} no longer exists")]
    ProductNotFound(ProductId),

    /// A cart entry's quantity exceeds what an order item can store.
    #[error("quantity for product {0} is too large")]
    QuantityTooLarge(ProductId),

    /// Database failure; the transaction is rolled back.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The result of a successful checkout.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total: Decimal,
}

/// Place an order from the user's cart.
///
/// On success the caller must clear the session cart; on any error the cart
/// is untouched so the user can retry. See the module docs for the
/// transaction shape.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart,
/// [`CheckoutError::ProductNotFound`] if any entry's product is gone
/// (full rollback), [`CheckoutError::QuantityTooLarge`] for a quantity
/// the `order_items` table cannot represent, or
/// [`CheckoutError::Repository`] on database failure.
pub async fn place_order(
    pool: &PgPool,
    notifier: &impl NotificationSink,
    user: &CurrentUser,
    cart: &Cart,
) -> Result<PlacedOrder, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut tx = pool.begin().await.map_err(RepositoryError::from)?;

    // Lock every product first and read its price under the lock. A
    // concurrent checkout touching the same product waits here until our
    // transaction ends, so the price cannot change mid-computation.
    let mut lines = Vec::with_capacity(cart.len());
    for (product_id, quantity) in cart.iter() {
        let quantity = line_quantity(product_id, quantity)?;
        let product = products::lock_for_update(&mut tx, product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(product_id))?;
        lines.push((product, quantity));
    }

    // Zero total placeholder: the order needs an identity before its item
    // subtotals are known.
    let order = orders::insert_order(&mut tx, user.id).await?;

    for (product, quantity) in &lines {
        orders::insert_item(&mut tx, order.id, product.id, *quantity, product.price).await?;
    }
    let total = order_total(&lines);

    orders::set_total(&mut tx, order.id, total).await?;
    tracking::insert_update(&mut tx, order.id, TrackingStatus::Processing, None).await?;

    tx.commit().await.map_err(RepositoryError::from)?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        total = %total,
        "order placed"
    );

    // Best-effort confirmation: the order is already committed, so a
    // delivery failure is logged and swallowed.
    send_confirmation(pool, notifier, user, order.id, &lines, total).await;

    Ok(PlacedOrder {
        order_id: order.id,
        total,
    })
}

/// Convert a cart quantity into the `order_items` storage type.
///
/// The cart route already rejects oversized quantities, but a stale session
/// value can still carry one, so the workflow re-checks before writing.
fn line_quantity(product: ProductId, quantity: u32) -> Result<i32, CheckoutError> {
    i32::try_from(quantity).map_err(|_| CheckoutError::QuantityTooLarge(product))
}

/// Sum of locked unit price times quantity over the order lines.
fn order_total(lines: &[(Product, i32)]) -> Decimal {
    lines
        .iter()
        .map(|(product, quantity)| product.price * Decimal::from(*quantity))
        .sum()
}

/// Send the order confirmation, logging any failure.
async fn send_confirmation(
    pool: &PgPool,
    notifier: &impl NotificationSink,
    user: &CurrentUser,
    order_id: OrderId,
    lines: &[(Product, i32)],
    total: Decimal,
) {
    // Prefer the durable email over the session copy in case the account
    // changed mid-session; fall back to the session value on lookup failure.
    let recipient = match UserRepository::new(pool).email_of(user.id).await {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "falling back to session email");
            user.email.clone()
        }
    };

    let summary: Vec<SummaryLine> = lines
        .iter()
        .map(|(product, quantity)| SummaryLine {
            name: product.name.clone(),
            quantity: *quantity,
            unit_price: product.price,
        })
        .collect();

    let message = notifications::order_confirmation(&recipient, order_id, &summary, total);
    if let Err(e) = notifier.send(&recipient, &message).await {
        tracing::warn!(
            order_id = %order_id,
            error = %e,
            "order confirmation delivery failed (order remains placed)"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use shopsphere_core::CategoryId;

    fn product(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category_id: CategoryId::new(1),
            price,
            description: String::new(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_total_is_sum_of_price_times_quantity() {
        let lines = vec![
            (product(1, dec!(1000.00)), 2),
            (product(2, dec!(2500.00)), 1),
        ];
        assert_eq!(order_total(&lines), dec!(4500.00));
    }

    #[test]
    fn test_order_total_of_no_lines_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_order_total_matches_single_line_subtotal() {
        let lines = vec![(product(3, dec!(19.99)), 3)];
        assert_eq!(order_total(&lines), dec!(59.97));
    }

    #[test]
    fn test_line_quantity_accepts_storable_values() {
        let id = ProductId::new(1);
        assert_eq!(line_quantity(id, 1).unwrap(), 1);
        assert_eq!(
            line_quantity(id, i32::MAX.unsigned_abs()).unwrap(),
            i32::MAX
        );
    }

    #[test]
    fn test_line_quantity_rejects_oversized_values() {
        let id = ProductId::new(7);
        assert!(matches!(
            line_quantity(id, u32::MAX),
            Err(CheckoutError::QuantityTooLarge(p)) if p == id
        ));
    }
}
