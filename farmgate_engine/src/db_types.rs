use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use fg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(pub String);

//--------------------------------------        Role          --------------------------------------------------------
/// The role attached to an authenticated identity. Farmers sell produce; vendors buy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Vendor,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Farmer => write!(f, "farmer"),
            Role::Vendor => write!(f, "vendor"),
        }
    }
}

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "vendor" => Ok(Role::Vendor),
            s => Err(ConversionError(format!("Invalid role: {s}"))),
        }
    }
}

//--------------------------------------    UserIdentity      --------------------------------------------------------
/// The authenticated identity supplied by the auth collaborator. The engine trusts this without
/// re-validating credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub role: Role,
}

impl UserIdentity {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_farmer(&self) -> bool {
        self.role == Role::Farmer
    }

    pub fn is_vendor(&self) -> bool {
        self.role == Role::Vendor
    }
}

//--------------------------------------      UnitType        --------------------------------------------------------
/// The measurement basis a price and quantity are expressed in. The unit is part of a cart line's
/// identity: the same product carted under two units produces two distinct lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Kg,
    Each,
    Sack,
}

impl Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitType::Kg => write!(f, "kg"),
            UnitType::Each => write!(f, "each"),
            UnitType::Sack => write!(f, "sack"),
        }
    }
}

impl FromStr for UnitType {
    type Err = ConversionError;

    /// Normalizes before matching: surrounding whitespace is trimmed, case is folded, and an empty
    /// string falls back to the default unit (kg).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "kg" => Ok(UnitType::Kg),
            "each" => Ok(UnitType::Each),
            "sack" => Ok(UnitType::Sack),
            s => Err(ConversionError(format!("Invalid unit type: {s}. Use kg, each, or sack."))),
        }
    }
}

impl UnitType {
    /// Parses an optional raw unit string from a request payload. Absent input means the default
    /// unit, anything else must be one of `kg`, `each` or `sack`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ConversionError> {
        match raw {
            None => Ok(UnitType::default()),
            Some(s) => s.parse(),
        }
    }
}

//--------------------------------------   FreshnessStatus    --------------------------------------------------------
/// The tier a product's freshness score maps onto. Derived at read time, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessStatus {
    Fresh,
    Aging,
    Old,
}

impl FreshnessStatus {
    /// Thresholds are inclusive on the upper tier: exactly 40 is Aging, exactly 70 is Fresh.
    pub fn from_score(score: i64) -> Self {
        if score < 40 {
            FreshnessStatus::Old
        } else if score < 70 {
            FreshnessStatus::Aging
        } else {
            FreshnessStatus::Fresh
        }
    }
}

impl Display for FreshnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessStatus::Fresh => write!(f, "Fresh"),
            FreshnessStatus::Aging => write!(f, "Aging"),
            FreshnessStatus::Old => write!(f, "Old"),
        }
    }
}

//--------------------------------------   OrderStatusType    --------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been created and awaits confirmation by the farmer.
    Pending,
    /// The farmer has accepted the order.
    Confirmed,
    /// The order has been handed to a courier.
    Shipped,
    /// The order has arrived with the vendor.
    Delivered,
    /// Administratively closed out. Reachable from any non-cancelled state.
    Completed,
    /// The order was cancelled before delivery.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Confirmed => write!(f, "confirmed"),
            OrderStatusType::Shipped => write!(f, "shipped"),
            OrderStatusType::Delivered => write!(f, "delivered"),
            OrderStatusType::Completed => write!(f, "completed"),
            OrderStatusType::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl OrderStatusType {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatusType::Cancelled | OrderStatusType::Completed)
    }

    /// The order lifecycle transition table.
    ///
    /// | From \ To | confirmed | shipped | delivered | completed | cancelled |
    /// |-----------|-----------|---------|-----------|-----------|-----------|
    /// | pending   | yes       | -       | -         | yes       | yes       |
    /// | confirmed | -         | yes     | -         | yes       | yes       |
    /// | shipped   | -         | -       | yes       | yes       | -         |
    /// | delivered | -         | -       | -         | yes       | -         |
    /// | completed | -         | -       | -         | -         | -         |
    /// | cancelled | -         | -       | -         | -         | -         |
    ///
    /// `completed` is an administrative close-out reachable from any non-cancelled state.
    /// `cancelled` and `completed` are terminal. A transition from a status to itself is not an
    /// allowed edge.
    pub fn can_transition_to(&self, next: OrderStatusType) -> bool {
        use OrderStatusType::*;
        matches!(
            (*self, next),
            (Pending, Confirmed | Cancelled) |
                (Confirmed, Shipped | Cancelled) |
                (Shipped, Delivered) |
                (Pending | Confirmed | Shipped | Delivered, Completed)
        )
    }
}

//--------------------------------------     PriceTable       --------------------------------------------------------
/// A product's per-unit price table plus the legacy single-price column retained as a mandatory
/// fallback. Some products only populate the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTable {
    pub each: Option<Money>,
    pub kg: Option<Money>,
    pub sack: Option<Money>,
    pub base: Money,
}

impl PriceTable {
    pub fn entry(&self, unit: UnitType) -> Option<Money> {
        match unit {
            UnitType::Each => self.each,
            UnitType::Kg => self.kg,
            UnitType::Sack => self.sack,
        }
    }
}

//--------------------------------------       Product        --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i64,
    pub farmer_id: i64,
    pub product_name: String,
    pub description: Option<String>,
    /// Legacy single-price column. Always populated; acts as the pricing fallback for units with
    /// no dedicated price-table entry.
    pub price: Money,
    pub price_each: Option<Money>,
    pub price_kg: Option<Money>,
    pub price_sack: Option<Money>,
    /// The canonical unit when a request does not specify one.
    pub unit_type: UnitType,
    /// Available stock. Never negative.
    pub quantity: i64,
    pub harvest_date: Option<NaiveDate>,
    pub expiry_days: Option<i64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn price_table(&self) -> PriceTable {
        PriceTable { each: self.price_each, kg: self.price_kg, sack: self.price_sack, base: self.price }
    }
}

//--------------------------------------      NewProduct      --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_each: Option<Money>,
    #[serde(default)]
    pub price_kg: Option<Money>,
    #[serde(default)]
    pub price_sack: Option<Money>,
    #[serde(default)]
    pub unit_type: UnitType,
    pub quantity: i64,
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_days: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Derives the base price stored in the legacy `price` column: the entry for the default unit
    /// when populated and non-zero, otherwise the first populated entry in kg, each, sack order.
    /// Returns `None` when every entry is empty, which creation rejects.
    pub fn base_price(&self) -> Option<Money> {
        let nonzero = |p: &Option<Money>| p.filter(|m| !m.is_zero());
        let preferred = match self.unit_type {
            UnitType::Kg => nonzero(&self.price_kg),
            UnitType::Each => nonzero(&self.price_each),
            UnitType::Sack => nonzero(&self.price_sack),
        };
        preferred.or_else(|| nonzero(&self.price_kg)).or_else(|| nonzero(&self.price_each)).or_else(|| nonzero(&self.price_sack))
    }
}

//--------------------------------------      CartLine        --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLine {
    pub id: i64,
    pub vendor_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_type: UnitType,
}

//--------------------------------------  CartLineWithProduct -------------------------------------------------------
/// A cart line joined with its product's live price table and stock, as read at cart-display and
/// checkout time. Prices are never frozen at add-time.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineWithProduct {
    pub id: i64,
    pub vendor_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_type: UnitType,
    pub product_name: String,
    pub farmer_id: i64,
    pub price: Money,
    pub price_each: Option<Money>,
    pub price_kg: Option<Money>,
    pub price_sack: Option<Money>,
    pub stock: i64,
    pub image_url: Option<String>,
}

impl CartLineWithProduct {
    pub fn price_table(&self) -> PriceTable {
        PriceTable { each: self.price_each, kg: self.price_kg, sack: self.price_sack, base: self.price }
    }
}

//--------------------------------------   CheckoutDetails    --------------------------------------------------------
/// Buyer-supplied metadata shared by every order produced from one checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutDetails {
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub order_notes: Option<String>,
}

impl CheckoutDetails {
    pub fn payment_method(&self) -> String {
        self.payment_method.clone().unwrap_or_else(|| "COD".to_string())
    }

    pub fn delivery_address(&self) -> String {
        self.delivery_address.clone().unwrap_or_default()
    }

    pub fn order_notes(&self) -> String {
        self.order_notes.clone().unwrap_or_default()
    }
}

//--------------------------------------      NewOrder        --------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub vendor_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
    /// Computed once at checkout and stored. Never recomputed afterwards.
    pub total_price: Money,
    pub payment_method: String,
    pub delivery_address: String,
    pub order_notes: String,
}

//--------------------------------------        Order         --------------------------------------------------------
/// Immutable once created, except for `status`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
    pub total_price: Money,
    pub payment_method: String,
    pub delivery_address: String,
    pub order_notes: String,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}
