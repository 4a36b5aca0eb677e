use log::debug;

use crate::{
    db_types::{UnitType, UserIdentity},
    helpers::{line_total, resolve_unit_price},
    market_api::{
        errors::MarketplaceError,
        order_objects::{CartItemView, CartView},
    },
    traits::{CartManagement, ProductManagement},
};

/// The `CartApi` manages per-vendor carts. Lines store only (product, quantity, unit); every
/// price a client sees is resolved against the product's live price table at display time.
pub struct CartApi<B> {
    db: B,
}

impl<B> CartApi<B>
where B: CartManagement + ProductManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Adds a product to the vendor's cart, merging quantities when a line for the same
    /// (product, unit) pair already exists. The unit string is normalised; a missing or empty
    /// unit falls back to kg. Stock is not checked here, checkout settles that.
    pub async fn add_to_cart(
        &self,
        user: &UserIdentity,
        product_id: i64,
        quantity: i64,
        unit: Option<&str>,
    ) -> Result<CartView, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can hold a cart".to_string()));
        }
        if quantity <= 0 {
            return Err(MarketplaceError::Validation("Cart quantity must be positive".to_string()));
        }
        let unit = UnitType::parse(unit).map_err(MarketplaceError::invalid_unit)?;
        let _ = self.db.fetch_product(product_id).await?.ok_or(MarketplaceError::ProductNotFound(product_id))?;
        let line = self.db.upsert_cart_line(user.id, product_id, quantity, unit).await?;
        debug!("🧺️ Vendor #{} holds {} {} of product #{product_id}", user.id, line.quantity, line.unit_type);
        self.cart(user).await
    }

    /// The vendor's cart with read-time pricing and the grand total.
    pub async fn cart(&self, user: &UserIdentity) -> Result<CartView, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can hold a cart".to_string()));
        }
        let lines = self.db.fetch_cart(user.id).await?;
        let items: Vec<CartItemView> = lines
            .into_iter()
            .map(|line| {
                let prices = line.price_table();
                let unit_price = resolve_unit_price(&prices, line.unit_type);
                let total_price = line_total(&prices, line.unit_type, line.quantity);
                CartItemView {
                    id: line.id,
                    product_id: line.product_id,
                    product_name: line.product_name,
                    farmer_id: line.farmer_id,
                    quantity: line.quantity,
                    unit_type: line.unit_type,
                    unit_price,
                    total_price,
                    stock: line.stock,
                    image_url: line.image_url,
                }
            })
            .collect();
        let cart_total = items.iter().map(|i| i.total_price).sum();
        Ok(CartView { items, cart_total })
    }

    /// Removes one line from the vendor's cart. Unknown lines and lines owned by another vendor
    /// are treated identically: the call succeeds and removes nothing.
    pub async fn remove_line(&self, user: &UserIdentity, line_id: i64) -> Result<(), MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can hold a cart".to_string()));
        }
        self.db.remove_cart_line(user.id, line_id).await
    }

    /// Empties the vendor's cart, returning the number of lines removed.
    pub async fn clear(&self, user: &UserIdentity) -> Result<u64, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can hold a cart".to_string()));
        }
        self.db.clear_cart(user.id).await
    }
}
