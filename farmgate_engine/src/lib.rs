//! Farmgate Marketplace Engine
//!
//! The Farmgate engine is the core logic for a farm-to-vendor produce marketplace. Farmers list
//! produce, vendors fill carts and check out, and orders move through a fixed lifecycle. The
//! library is provider-agnostic and split into two sections:
//! 1. Database management and control ([`mod@db`]). SQLite is the supported backend. You should
//!    never need to access the database directly; use the public APIs instead. The exception is
//!    the data types used in the database, which live in the public `db_types` module.
//! 2. The marketplace public API ([`mod@market_api`]). These types enforce the business rules
//!    the storage layer does not know about: role checks, request validation, and the read-time
//!    derivation of freshness scores and unit pricing. Backends implement the traits in
//!    [`mod@traits`] to power them.
mod db;

pub mod db_types;
pub mod helpers;
pub mod market_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{self, SqliteDatabase};
pub use db::traits::{self, CartManagement, MarketplaceDatabase, OrderManagement, ProductManagement};
pub use market_api::{
    cart_api::CartApi,
    errors::MarketplaceError,
    order_flow_api::OrderFlowApi,
    order_objects,
    product_api::ProductApi,
};
