//! # Database backend contracts.
//!
//! This module defines the interface contracts a storage backend must expose in order to power the
//! Farmgate marketplace engine.
//!
//! ## Traits
//! * [`MarketplaceDatabase`] defines the transactional order-flow behaviour: converting a cart
//!   into orders, direct purchases, and ownership-gated status transitions. Everything it does is
//!   atomic; a failed checkout leaves no orders, no cleared cart lines and no stock changes
//!   behind.
//! * [`ProductManagement`] defines product catalog reads and writes.
//! * [`CartManagement`] defines the per-vendor cart: merge-on-add line upserts, reads joined with
//!   live product pricing, and idempotent removal.
//! * [`OrderManagement`] defines order history queries for both sides of the marketplace.
mod cart_management;
mod marketplace_database;
mod order_management;
mod product_management;

pub use cart_management::CartManagement;
pub use marketplace_database::MarketplaceDatabase;
pub use order_management::OrderManagement;
pub use product_management::ProductManagement;
