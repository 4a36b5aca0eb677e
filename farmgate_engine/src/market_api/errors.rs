use thiserror::Error;

use crate::db_types::{ConversionError, OrderStatusType};

/// The error taxonomy surfaced by the marketplace engine. Every variant maps onto a stable,
/// enumerable kind with a human-readable message; storage internals never leak past the
/// `Database` variant.
#[derive(Debug, Clone, Error)]
pub enum MarketplaceError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("{0}")]
    InvalidUnit(String),
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
    #[error("Product #{0} not found")]
    ProductNotFound(i64),
    #[error("Order #{0} not found")]
    OrderNotFound(i64),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Insufficient stock for {product}. Available: {available}")]
    InsufficientStock { product: String, available: i64 },
    #[error("Order status cannot change from {from} to {to}")]
    InvalidTransition { from: OrderStatusType, to: OrderStatusType },
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for MarketplaceError {
    fn from(e: sqlx::Error) -> Self {
        MarketplaceError::Database(e.to_string())
    }
}

impl MarketplaceError {
    pub fn invalid_unit(e: ConversionError) -> Self {
        MarketplaceError::InvalidUnit(e.to_string())
    }

    pub fn invalid_status(e: ConversionError) -> Self {
        MarketplaceError::InvalidStatus(e.to_string())
    }
}
