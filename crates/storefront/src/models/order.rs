//! Order models: orders, item snapshots, and the tracking ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use shopsphere_core::{OrderId, OrderItemId, OrderStatus, ProductId, TrackingId, TrackingStatus, UserId};

/// A placed order.
///
/// `total_price` is derived from the item snapshots at checkout and is never
/// client-supplied. Orders are a historical record and are never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// One line of an order.
///
/// `unit_price` is the catalog price at the moment of purchase, read under a
/// row lock. `product_id` goes `None` if the product is later deleted.
/// Rows are immutable after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: Option<ProductId>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Line subtotal (unit price x quantity).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// One append-only tracking ledger row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrackingUpdate {
    pub id: TrackingId,
    pub order_id: OrderId,
    pub status: TrackingStatus,
    pub location: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A tracking row joined to its parent order, for the per-user history view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrackingEntry {
    pub id: TrackingId,
    pub order_id: OrderId,
    pub status: TrackingStatus,
    pub location: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub order_total: Decimal,
    pub order_created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_subtotal() {
        let item = OrderItem {
            id: OrderItemId::new(1),
            order_id: OrderId::new(1),
            product_id: Some(ProductId::new(9)),
            quantity: 3,
            unit_price: dec!(1000.00),
        };
        assert_eq!(item.subtotal(), dec!(3000.00));
    }
}
