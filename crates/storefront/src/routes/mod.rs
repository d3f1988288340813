//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//!
//! # Auth
//! POST /auth/register                 - Create an account and log in
//! POST /auth/login                    - Login
//! POST /auth/logout                   - Logout
//!
//! # Catalog
//! GET  /products                      - Product listing (?category=&page=)
//! GET  /products/{id}                 - Product detail with sizes, colors, reviews
//! GET  /categories                    - Category listing
//!
//! # Cart (session-backed)
//! GET  /cart                          - Cart snapshot
//! POST /cart/add                      - Merge quantity into an entry
//! POST /cart/update                   - Set quantity (0 removes)
//! POST /cart/remove                   - Remove an entry
//! GET  /cart/count                    - Item count badge
//!
//! # Checkout (requires auth)
//! POST /checkout                      - Place an order from the cart
//!
//! # Orders (requires auth)
//! GET  /orders                        - Order history (?page=)
//! GET  /orders/{id}                   - Order detail with items and tracking
//! GET  /orders/{id}/tracking          - Tracking ledger, newest first
//! POST /orders/{id}/tracking          - Append tracking update (staff only)
//! GET  /tracking                      - Tracking feed across the user's orders
//!
//! # Reviews (requires auth)
//! POST /products/{id}/reviews         - Submit a review (delivery-gated)
//! GET  /account/reviews               - The user's own reviews
//!
//! # Wishlist (requires auth)
//! GET    /wishlist                    - The user's wishlist
//! POST   /wishlist/{product_id}       - Add (idempotent)
//! DELETE /wishlist/{product_id}       - Remove (idempotent)
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", post(reviews::create))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route(
            "/{id}/tracking",
            get(orders::tracking).post(orders::append_tracking),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index))
        .route(
            "/{product_id}",
            post(wishlist::add).delete(wishlist::remove),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place))
        .nest("/orders", order_routes())
        .route("/tracking", get(orders::tracking_feed))
        .route("/account/reviews", get(reviews::mine))
        .nest("/wishlist", wishlist_routes())
}
