//! Catalog models: categories, products, and their option sets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use shopsphere_core::{CategoryId, ColorId, ProductId, SizeId};

/// A product category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A catalog product.
///
/// The price here is the live catalog price; checkout reads it under a row
/// lock and copies it into the order item, so later edits never retroactively
/// change an order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An available size option.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
}

/// An available color option.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
}
