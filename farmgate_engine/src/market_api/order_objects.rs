use chrono::{DateTime, NaiveDate, Utc};
use fg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    db_types::{FreshnessStatus, OrderStatusType, Product, UnitType},
    helpers::Freshness,
};

/// One row of an order history listing, for either side of the marketplace. The product name is
/// joined in so clients do not need a second lookup.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderHistoryRow {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: Money,
    pub payment_method: String,
    pub delivery_address: String,
    pub order_notes: String,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

/// A catalog entry as returned to clients: the stored product plus the freshness assessment
/// derived at read time. Listing the same product twice may legitimately return different
/// freshness numbers because the clock moved.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub id: i64,
    pub farmer_id: i64,
    pub product_name: String,
    pub description: Option<String>,
    pub price: Money,
    pub price_each: Option<Money>,
    pub price_kg: Option<Money>,
    pub price_sack: Option<Money>,
    pub unit_type: UnitType,
    pub quantity: i64,
    pub harvest_date: Option<NaiveDate>,
    pub expiry_days: Option<i64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub freshness_score: i64,
    pub freshness_status: FreshnessStatus,
    pub discount_price: Option<Money>,
}

impl ProductListing {
    pub fn new(product: Product, freshness: Freshness) -> Self {
        Self {
            id: product.id,
            farmer_id: product.farmer_id,
            product_name: product.product_name,
            description: product.description,
            price: product.price,
            price_each: product.price_each,
            price_kg: product.price_kg,
            price_sack: product.price_sack,
            unit_type: product.unit_type,
            quantity: product.quantity,
            harvest_date: product.harvest_date,
            expiry_days: product.expiry_days,
            image_url: product.image_url,
            created_at: product.created_at,
            freshness_score: freshness.score,
            freshness_status: freshness.status,
            discount_price: freshness.discount_price,
        }
    }
}

/// Confirmation returned when a farmer lists a product, echoing the freshness assessment so the
/// client can show the smart-deal state immediately.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreated {
    pub product_id: i64,
    pub freshness_score: i64,
    pub freshness_status: FreshnessStatus,
    pub discount_price: Option<Money>,
}

/// A cart line priced at display time against the product's live price table.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub farmer_id: i64,
    pub quantity: i64,
    pub unit_type: UnitType,
    pub unit_price: Money,
    pub total_price: Money,
    pub stock: i64,
    pub image_url: Option<String>,
}

/// The vendor's whole cart with the grand total across lines.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub cart_total: Money,
}
