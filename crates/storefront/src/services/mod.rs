//! Business logic services for the storefront.
//!
//! Route handlers stay thin; the workflows live here:
//!
//! - `auth` - registration and password login
//! - `cart` - resolving the session cart against the catalog
//! - `checkout` - the transactional order placement workflow
//! - `tracking` - the append-only fulfillment ledger
//! - `reviews` - the delivery-gated review submission
//! - `notifications` - the best-effort mail sink the workflows call into

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod notifications;
pub mod reviews;
pub mod tracking;
