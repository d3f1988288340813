//! The session cart value object.
//!
//! The cart is ephemeral per-session state: a mapping from product-id-string
//! to quantity, exactly as it is serialized into the session store. Nothing
//! durable is written until checkout, and the checkout workflow receives the
//! cart as an explicit value rather than reaching into the session itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopsphere_core::ProductId;

/// A per-session shopping cart.
///
/// Keys are product IDs as strings (the session wire format); quantities are
/// always >= 1. Entries whose keys fail to parse as product IDs are skipped
/// on iteration rather than failing the whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Merge `quantity` into the entry for `product_id`, creating it if absent.
    ///
    /// Adding zero is a no-op so an existing entry is never disturbed.
    /// Quantities saturate at `u32::MAX` rather than wrapping.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.entries.entry(product_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Remove the entry for `product_id` unconditionally.
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.remove(&product_id.to_string());
    }

    /// Set the entry for `product_id` to `quantity` if positive, else remove it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity > 0 {
            self.entries.insert(product_id.to_string(), quantity);
        } else {
            self.entries.remove(&product_id.to_string());
        }
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total quantity across all entries, saturating at `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries
            .values()
            .fold(0u32, |count, &quantity| count.saturating_add(quantity))
    }

    /// Iterate over (product id, quantity) pairs, skipping unparseable keys.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, &quantity)| key.parse::<ProductId>().ok().map(|id| (id, quantity)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_quantity() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(1), 3);
        assert_eq!(cart.iter().collect::<Vec<_>>(), vec![(ProductId::new(1), 5)]);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 0);
        assert!(cart.is_empty());

        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(1), 0);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(4), 1);
        cart.remove(ProductId::new(4));
        cart.remove(ProductId::new(4)); // absent entry, still fine
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_positive_sets() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(2), 5);
        cart.set_quantity(ProductId::new(2), 1);
        assert_eq!(cart.iter().collect::<Vec<_>>(), vec![(ProductId::new(2), 1)]);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(2), 5);
        cart.set_quantity(ProductId::new(2), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_iter_skips_unparseable_keys() {
        // Simulate a stale session value with a junk key.
        let json = r#"{"7": 2, "not-an-id": 1}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.iter().collect::<Vec<_>>(), vec![(ProductId::new(7), 2)]);
    }

    #[test]
    fn test_serde_is_plain_string_map() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(3), 1);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"3":1}"#);
    }

    #[test]
    fn test_add_saturates_at_max() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), u32::MAX);
        cart.add(ProductId::new(1), 5);
        assert_eq!(
            cart.iter().collect::<Vec<_>>(),
            vec![(ProductId::new(1), u32::MAX)]
        );
    }

    #[test]
    fn test_item_count_saturates_across_entries() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), u32::MAX);
        cart.add(ProductId::new(2), 10);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_item_count_and_len() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(2), 1);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 3);
    }
}
