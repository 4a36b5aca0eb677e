use thiserror::Error;

use crate::market_api::errors::MarketplaceError;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database query error: {0}")]
    QueryError(String),
}

impl From<SqliteDatabaseError> for MarketplaceError {
    fn from(e: SqliteDatabaseError) -> Self {
        MarketplaceError::Database(e.to_string())
    }
}
