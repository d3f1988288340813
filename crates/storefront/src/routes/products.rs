//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use shopsphere_core::{CategoryId, ProductId};

use crate::db::products::ProductRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::product::{Category, Color, Product, Size};
use crate::models::review::Review;
use crate::state::AppState;

/// Products per listing page.
const PAGE_SIZE: i64 = 24;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<CategoryId>,
    pub page: Option<u32>,
}

/// A page of products.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub page: u32,
}

/// A product with its option sets and reviews.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: Product,
    pub sizes: Vec<Size>,
    pub colors: Vec<Color>,
    pub reviews: Vec<Review>,
}

/// List products, newest first, optionally filtered by category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let offset = i64::from(page - 1) * PAGE_SIZE;

    let products = ProductRepository::new(state.pool())
        .list(query.category, PAGE_SIZE, offset)
        .await?;

    Ok(Json(ProductListResponse { products, page }))
}

/// Show one product with its sizes, colors, and reviews.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailResponse>> {
    let repo = ProductRepository::new(state.pool());

    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let sizes = repo.sizes(id).await?;
    let colors = repo.colors(id).await?;
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(id)
        .await?;

    Ok(Json(ProductDetailResponse {
        product,
        sizes,
        colors,
        reviews,
    }))
}

/// List all categories.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = ProductRepository::new(state.pool()).categories().await?;
    Ok(Json(categories))
}
