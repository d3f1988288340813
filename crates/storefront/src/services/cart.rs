//! Cart snapshot assembly.
//!
//! The cart itself is a session value ([`crate::models::Cart`]); this module
//! resolves it against the live catalog for display. Entries whose product
//! no longer exists are skipped, not errors - the authoritative check
//! happens at checkout under row locks.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use shopsphere_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::Cart;
use crate::models::product::Product;

/// One resolved cart line.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// The cart resolved against the live catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl CartSnapshot {
    /// An empty snapshot.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// Resolve a cart against the catalog.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the product lookup fails.
pub async fn snapshot(pool: &PgPool, cart: &Cart) -> Result<CartSnapshot, RepositoryError> {
    let ids: Vec<ProductId> = cart.iter().map(|(id, _)| id).collect();
    let products = ProductRepository::new(pool).get_many(&ids).await?;
    Ok(build_snapshot(cart, products))
}

/// Assemble a snapshot from a cart and the products that still exist.
///
/// Pure so the skipping and totalling rules are testable without a database.
#[must_use]
pub fn build_snapshot(cart: &Cart, products: Vec<Product>) -> CartSnapshot {
    let mut by_id: HashMap<ProductId, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();

    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for (product_id, quantity) in cart.iter() {
        // Product deleted since it was added to the cart: skip the entry.
        let Some(product) = by_id.remove(&product_id) else {
            continue;
        };

        let subtotal = product.price * Decimal::from(quantity);
        total += subtotal;
        lines.push(CartLine {
            product,
            quantity,
            subtotal,
        });
    }

    CartSnapshot { lines, total }
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
    fn test_snapshot_totals() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(2), 1);

        let snapshot = build_snapshot(
            &cart,
            vec![product(1, dec!(1000.00)), product(2, dec!(2500.00))],
        );

        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.total, dec!(4500.00));
        let first = snapshot.lines.first().unwrap();
        assert_eq!(first.quantity, 2);
        assert_eq!(first.subtotal, dec!(2000.00));
    }

    #[test]
    fn test_snapshot_skips_missing_products() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(9), 3); // deleted product

        let snapshot = build_snapshot(&cart, vec![product(1, dec!(500.00))]);

        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.total, dec!(1000.00));
    }

    #[test]
    fn test_empty_cart_snapshot() {
        let snapshot = build_snapshot(&Cart::new(), Vec::new());
        assert!(snapshot.lines.is_empty());
        assert_eq!(snapshot.total, Decimal::ZERO);
    }
}
