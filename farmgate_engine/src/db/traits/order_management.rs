use crate::{
    db_types::Order,
    market_api::{errors::MarketplaceError, order_objects::OrderHistoryRow},
};

/// The `OrderManagement` trait defines order history queries for both sides of the marketplace.
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    async fn order_by_id(&self, order_id: i64) -> Result<Option<Order>, MarketplaceError>;

    /// The vendor's purchase history, newest first.
    async fn orders_for_vendor(&self, vendor_id: i64) -> Result<Vec<OrderHistoryRow>, MarketplaceError>;

    /// The farmer's sales history: every order placed against one of their products, newest
    /// first.
    async fn orders_for_farmer(&self, farmer_id: i64) -> Result<Vec<OrderHistoryRow>, MarketplaceError>;
}
