//! Seed the catalog with demo data.
//!
//! Inserts a small set of categories, option sets, and products for local
//! development. Categories key on their slug, so re-running the command
//! only tops up what is missing.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use super::migrate::MigrationError;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Environment or connection problem.
    #[error(transparent)]
    Setup(#[from] MigrationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const SIZES: &[&str] = &["S", "M", "L", "XL"];
const COLORS: &[&str] = &["Black", "White", "Red", "Blue"];

struct DemoProduct {
    name: &'static str,
    category_slug: &'static str,
    price: &'static str,
    description: &'static str,
}

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Ankara Shirt",
        category_slug: "clothing",
        price: "1000.00",
        description: "Hand-printed ankara shirt.",
    },
    DemoProduct {
        name: "Leather Sandals",
        category_slug: "footwear",
        price: "2500.00",
        description: "Full-grain leather sandals.",
    },
    DemoProduct {
        name: "Canvas Tote",
        category_slug: "accessories",
        price: "750.00",
        description: "Heavy canvas tote bag.",
    },
    DemoProduct {
        name: "Denim Jacket",
        category_slug: "clothing",
        price: "4200.00",
        description: "Stonewashed denim jacket.",
    },
];

const CATEGORIES: &[(&str, &str)] = &[
    ("Clothing", "clothing"),
    ("Footwear", "footwear"),
    ("Accessories", "accessories"),
];

/// Seed the demo catalog.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let database_url = super::migrate::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    for (name, slug) in CATEGORIES {
        sqlx::query(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .execute(&pool)
        .await?;
    }

    for size in SIZES {
        seed_option(&pool, "sizes", size).await?;
    }
    for color in COLORS {
        seed_option(&pool, "colors", color).await?;
    }

    let mut created = 0u32;
    for product in PRODUCTS {
        if seed_product(&pool, product).await? {
            created += 1;
        }
    }

    tracing::info!("Seed complete ({created} products created)");
    Ok(())
}

/// Insert a named option row if no row with that name exists yet.
async fn seed_option(pool: &PgPool, table: &str, name: &str) -> Result<(), SeedError> {
    // Option tables have no unique constraint on name, so guard by lookup.
    let query = format!(
        "INSERT INTO {table} (name) SELECT $1 WHERE NOT EXISTS \
         (SELECT 1 FROM {table} WHERE name = $1)"
    );
    sqlx::query(&query).bind(name).execute(pool).await?;
    Ok(())
}

/// Insert a demo product with the full size and color sets.
///
/// Returns `false` if a product with that name already exists.
async fn seed_product(pool: &PgPool, product: &DemoProduct) -> Result<bool, SeedError> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM products WHERE name = $1")
        .bind(product.name)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let price: Decimal = product.price.parse().unwrap_or_default();

    let (product_id,): (i32,) = sqlx::query_as(
        r"
        INSERT INTO products (name, category_id, price, description)
        VALUES ($1, (SELECT id FROM categories WHERE slug = $2), $3, $4)
        RETURNING id
        ",
    )
    .bind(product.name)
    .bind(product.category_slug)
    .bind(price)
    .bind(product.description)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        "INSERT INTO product_sizes (product_id, size_id) SELECT $1, id FROM sizes \
         ON CONFLICT DO NOTHING",
    )
    .bind(product_id)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO product_colors (product_id, color_id) SELECT $1, id FROM colors \
         ON CONFLICT DO NOTHING",
    )
    .bind(product_id)
    .execute(pool)
    .await?;

    Ok(true)
}
