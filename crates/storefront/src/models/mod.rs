//! Domain models for the storefront.

pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod user;

pub use cart::Cart;
pub use session::{CurrentUser, keys as session_keys};
