//! The high-level marketplace APIs that sit between the HTTP layer and the storage traits.
//!
//! Each API wraps a backend implementing the relevant [`crate::traits`] and enforces the business
//! rules the storage layer does not know about: role checks, request validation, and read-time
//! derivation of freshness and pricing.

pub mod cart_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod product_api;

pub use cart_api::CartApi;
pub use errors::MarketplaceError;
pub use order_flow_api::OrderFlowApi;
pub use order_objects::{CartItemView, CartView, OrderHistoryRow, ProductCreated, ProductListing};
pub use product_api::ProductApi;
