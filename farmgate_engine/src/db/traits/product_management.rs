use fg_common::Money;

use crate::{
    db_types::{NewProduct, Product},
    market_api::errors::MarketplaceError,
};

/// The `ProductManagement` trait defines catalog reads and writes. Freshness is not part of this
/// contract: backends store only `harvest_date` and `expiry_days`, and the API layer derives
/// score, tier and discount on every read.
#[allow(async_fn_in_trait)]
pub trait ProductManagement: Clone {
    /// Stores a new product for the given farmer. `base_price` is the derived legacy price
    /// column; callers must have validated that the price table is resolvable.
    async fn insert_product(
        &self,
        farmer_id: i64,
        product: &NewProduct,
        base_price: Money,
    ) -> Result<i64, MarketplaceError>;

    /// Fetches a single product, or `None` if it does not exist.
    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, MarketplaceError>;

    /// Fetches all listings, newest first.
    async fn fetch_products(&self) -> Result<Vec<Product>, MarketplaceError>;
}
