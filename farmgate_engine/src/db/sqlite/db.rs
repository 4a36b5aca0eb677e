use chrono::Utc;
use log::debug;
use sqlx::SqlitePool;

use crate::{
    db::{
        sqlite::{cart, new_pool, orders, products},
        traits::{CartManagement, MarketplaceDatabase, OrderManagement, ProductManagement},
    },
    db_types::{
        CartLine, CartLineWithProduct, CheckoutDetails, NewOrder, NewProduct, Order, OrderStatusType, Product,
        UnitType,
    },
    helpers::{assess_freshness, line_total},
    market_api::{errors::MarketplaceError, order_objects::OrderHistoryRow},
};
use fg_common::Money;

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object.
    pub async fn new(max_connections: u32) -> Result<Self, MarketplaceError> {
        let url = super::db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, MarketplaceError> {
        let pool = new_pool(url, max_connections).await?;
        debug!("🗃️ Connected to database {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl MarketplaceDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn checkout_cart(
        &self,
        vendor_id: i64,
        details: &CheckoutDetails,
    ) -> Result<Vec<Order>, MarketplaceError> {
        let mut tx = self.pool.begin().await?;
        let lines = cart::cart_lines_with_products(vendor_id, &mut tx).await?;
        if lines.is_empty() {
            return Err(MarketplaceError::EmptyCart);
        }
        // Validate every line before mutating anything. One short line fails the whole checkout.
        for line in &lines {
            if line.quantity > line.stock {
                return Err(MarketplaceError::InsufficientStock {
                    product: line.product_name.clone(),
                    available: line.stock,
                });
            }
        }
        let mut result = Vec::with_capacity(lines.len());
        for line in &lines {
            let total_price = line_total(&line.price_table(), line.unit_type, line.quantity);
            let affected = products::decrement_stock(line.product_id, line.quantity, &mut tx).await?;
            if affected == 0 {
                // A concurrent checkout beat us to the stock between the validation pass and the
                // decrement. The conditional update left the row untouched; abort the lot.
                let available = products::stock_of(line.product_id, &mut tx).await?.unwrap_or_default();
                return Err(MarketplaceError::InsufficientStock { product: line.product_name.clone(), available });
            }
            let new_order = NewOrder {
                vendor_id: Some(vendor_id),
                product_id: line.product_id,
                quantity: line.quantity,
                total_price,
                payment_method: details.payment_method(),
                delivery_address: details.delivery_address(),
                order_notes: details.order_notes(),
            };
            let order = orders::insert_order(&new_order, &mut tx).await?;
            result.push(order);
        }
        cart::clear_cart(vendor_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🔄️ Checkout for vendor #{vendor_id} produced {} order(s)", result.len());
        Ok(result)
    }

    async fn create_direct_order(
        &self,
        vendor_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<Order, MarketplaceError> {
        if quantity <= 0 {
            return Err(MarketplaceError::Validation("Order quantity must be positive".to_string()));
        }
        let mut tx = self.pool.begin().await?;
        let product = products::fetch_product(product_id, &mut tx)
            .await?
            .ok_or(MarketplaceError::ProductNotFound(product_id))?;
        if quantity > product.quantity {
            return Err(MarketplaceError::InsufficientStock {
                product: product.product_name.clone(),
                available: product.quantity,
            });
        }
        // Smart-deal pricing applies to direct purchases: an Old product sells at its discount
        // price, anything fresher at the base price.
        let freshness = assess_freshness(product.harvest_date, product.expiry_days, product.price, Utc::now());
        let unit_price = freshness.discount_price.unwrap_or(product.price);
        let affected = products::decrement_stock(product_id, quantity, &mut tx).await?;
        if affected == 0 {
            let available = products::stock_of(product_id, &mut tx).await?.unwrap_or_default();
            return Err(MarketplaceError::InsufficientStock { product: product.product_name, available });
        }
        let details = CheckoutDetails::default();
        let new_order = NewOrder {
            vendor_id: Some(vendor_id),
            product_id,
            quantity,
            total_price: unit_price * quantity,
            payment_method: details.payment_method(),
            delivery_address: details.delivery_address(),
            order_notes: details.order_notes(),
        };
        let order = orders::insert_order(&new_order, &mut tx).await?;
        tx.commit().await?;
        debug!("🔄️ Direct order #{} placed by vendor #{vendor_id} for product #{product_id}", order.id);
        Ok(order)
    }

    async fn transition_order(
        &self,
        farmer_id: i64,
        order_id: i64,
        new_status: OrderStatusType,
    ) -> Result<Order, MarketplaceError> {
        let mut tx = self.pool.begin().await?;
        let order =
            orders::fetch_order(order_id, &mut tx).await?.ok_or(MarketplaceError::OrderNotFound(order_id))?;
        let owner = products::owner_of(order.product_id, &mut tx)
            .await?
            .ok_or(MarketplaceError::ProductNotFound(order.product_id))?;
        if owner != farmer_id {
            return Err(MarketplaceError::Forbidden("Only the farmer who listed the product may update the order".to_string()));
        }
        if !order.status.can_transition_to(new_status) {
            return Err(MarketplaceError::InvalidTransition { from: order.status, to: new_status });
        }
        let updated = orders::update_order_status(order_id, new_status, &mut tx).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn close(&mut self) -> Result<(), MarketplaceError> {
        self.pool.close().await;
        Ok(())
    }
}

impl ProductManagement for SqliteDatabase {
    async fn insert_product(
        &self,
        farmer_id: i64,
        product: &NewProduct,
        base_price: Money,
    ) -> Result<i64, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let id = products::insert_product(farmer_id, product, base_price, &mut conn).await?;
        Ok(id)
    }

    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product(product_id, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::fetch_products(&mut conn).await?;
        Ok(products)
    }
}

impl CartManagement for SqliteDatabase {
    async fn upsert_cart_line(
        &self,
        vendor_id: i64,
        product_id: i64,
        quantity: i64,
        unit: UnitType,
    ) -> Result<CartLine, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let line = cart::upsert_line(vendor_id, product_id, quantity, unit, &mut conn).await?;
        Ok(line)
    }

    async fn fetch_cart(&self, vendor_id: i64) -> Result<Vec<CartLineWithProduct>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let lines = cart::cart_lines_with_products(vendor_id, &mut conn).await?;
        Ok(lines)
    }

    async fn remove_cart_line(&self, vendor_id: i64, line_id: i64) -> Result<(), MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let _ = cart::delete_line(vendor_id, line_id, &mut conn).await?;
        Ok(())
    }

    async fn clear_cart(&self, vendor_id: i64) -> Result<u64, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let n = cart::clear_cart(vendor_id, &mut conn).await?;
        Ok(n)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn order_by_id(&self, order_id: i64) -> Result<Option<Order>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn orders_for_vendor(&self, vendor_id: i64) -> Result<Vec<OrderHistoryRow>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let rows = orders::orders_for_vendor(vendor_id, &mut conn).await?;
        Ok(rows)
    }

    async fn orders_for_farmer(&self, farmer_id: i64) -> Result<Vec<OrderHistoryRow>, MarketplaceError> {
        let mut conn = self.pool.acquire().await?;
        let rows = orders::orders_for_farmer(farmer_id, &mut conn).await?;
        Ok(rows)
    }
}
