use crate::{
    db_types::{CartLine, CartLineWithProduct, UnitType},
    market_api::errors::MarketplaceError,
};

/// The `CartManagement` trait defines the per-vendor cart store.
///
/// A cart line's identity is the (vendor, product, unit) triple. Adding to an existing triple
/// merges quantities; the backend must serialise concurrent adds on the same triple so the
/// merge can never produce duplicate lines.
#[allow(async_fn_in_trait)]
pub trait CartManagement: Clone {
    /// Adds `quantity` of a product under the given unit, merging into an existing line for the
    /// same (vendor, product, unit) triple when one exists. Stock is deliberately not checked
    /// here; carts may exceed stock and the conflict is resolved at checkout.
    ///
    /// Returns the resulting line.
    async fn upsert_cart_line(
        &self,
        vendor_id: i64,
        product_id: i64,
        quantity: i64,
        unit: UnitType,
    ) -> Result<CartLine, MarketplaceError>;

    /// Fetches the vendor's cart lines joined with each product's live price table and stock.
    async fn fetch_cart(&self, vendor_id: i64) -> Result<Vec<CartLineWithProduct>, MarketplaceError>;

    /// Removes a single line, scoped to the owning vendor. Removing a line that does not exist,
    /// or that belongs to someone else, is an idempotent no-op.
    async fn remove_cart_line(&self, vendor_id: i64, line_id: i64) -> Result<(), MarketplaceError>;

    /// Removes every line the vendor holds, returning the number of lines deleted.
    async fn clear_cart(&self, vendor_id: i64) -> Result<u64, MarketplaceError>;
}
