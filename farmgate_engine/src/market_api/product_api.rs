use chrono::Utc;
use log::debug;

use crate::{
    db_types::{NewProduct, UserIdentity},
    helpers::assess_freshness,
    market_api::{
        errors::MarketplaceError,
        order_objects::{ProductCreated, ProductListing},
    },
    traits::ProductManagement,
};

/// The `ProductApi` handles the catalog: farmers list produce, everyone browses it. Freshness is
/// assessed against the clock on every read, never persisted.
pub struct ProductApi<B> {
    db: B,
}

impl<B> ProductApi<B>
where B: ProductManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Lists a new product for the given farmer. Vendors may not list produce. At least one
    /// price-table entry must be populated and non-zero, since the derived base price backs every
    /// unit with no entry of its own.
    pub async fn create_product(
        &self,
        user: &UserIdentity,
        product: &NewProduct,
    ) -> Result<ProductCreated, MarketplaceError> {
        if !user.is_farmer() {
            return Err(MarketplaceError::Forbidden("Only farmers can list products".to_string()));
        }
        if product.product_name.trim().is_empty() {
            return Err(MarketplaceError::Validation("Product name must not be empty".to_string()));
        }
        if product.quantity < 0 {
            return Err(MarketplaceError::Validation("Product quantity must not be negative".to_string()));
        }
        let base_price = product
            .base_price()
            .ok_or_else(|| MarketplaceError::Validation("At least one price must be provided".to_string()))?;
        let id = self.db.insert_product(user.id, product, base_price).await?;
        debug!("🌱️ Farmer #{} listed product #{id} ({})", user.id, product.product_name);
        let freshness = assess_freshness(product.harvest_date, product.expiry_days, base_price, Utc::now());
        Ok(ProductCreated {
            product_id: id,
            freshness_score: freshness.score,
            freshness_status: freshness.status,
            discount_price: freshness.discount_price,
        })
    }

    /// A single listing with its freshness derived at call time.
    pub async fn product(&self, product_id: i64) -> Result<ProductListing, MarketplaceError> {
        let product =
            self.db.fetch_product(product_id).await?.ok_or(MarketplaceError::ProductNotFound(product_id))?;
        let freshness = assess_freshness(product.harvest_date, product.expiry_days, product.price, Utc::now());
        Ok(ProductListing::new(product, freshness))
    }

    /// The full catalog, newest first. Every listing in one response is assessed against the same
    /// instant so the page is internally consistent.
    pub async fn products(&self) -> Result<Vec<ProductListing>, MarketplaceError> {
        let now = Utc::now();
        let products = self.db.fetch_products().await?;
        let listings = products
            .into_iter()
            .map(|p| {
                let freshness = assess_freshness(p.harvest_date, p.expiry_days, p.price, now);
                ProductListing::new(p, freshness)
            })
            .collect();
        Ok(listings)
    }
}
