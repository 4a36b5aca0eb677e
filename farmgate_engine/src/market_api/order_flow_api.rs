use log::{debug, info};

use crate::{
    db_types::{CheckoutDetails, Order, OrderStatusType, UserIdentity},
    market_api::{errors::MarketplaceError, order_objects::OrderHistoryRow},
    traits::{MarketplaceDatabase, OrderManagement},
};

/// The `OrderFlowApi` drives orders through their lifecycle: checkout, direct purchase, history
/// queries and the farmer-gated status transitions.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> OrderFlowApi<B>
where B: MarketplaceDatabase + OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Converts the vendor's whole cart into orders atomically. See
    /// [`MarketplaceDatabase::checkout_cart`] for the transactional guarantees.
    pub async fn checkout(
        &self,
        user: &UserIdentity,
        details: &CheckoutDetails,
    ) -> Result<Vec<Order>, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can check out".to_string()));
        }
        let orders = self.db.checkout_cart(user.id, details).await?;
        info!("🔄️ Vendor #{} checked out {} order(s)", user.id, orders.len());
        Ok(orders)
    }

    /// Places a single-product order without touching the cart. Old produce is charged at its
    /// smart-deal discount price.
    pub async fn direct_purchase(
        &self,
        user: &UserIdentity,
        product_id: i64,
        quantity: i64,
    ) -> Result<Order, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors can place orders".to_string()));
        }
        let order = self.db.create_direct_order(user.id, product_id, quantity).await?;
        info!("🔄️ Vendor #{} placed direct order #{} for product #{product_id}", user.id, order.id);
        Ok(order)
    }

    /// The vendor's purchase history, newest first.
    pub async fn purchases(&self, user: &UserIdentity) -> Result<Vec<OrderHistoryRow>, MarketplaceError> {
        if !user.is_vendor() {
            return Err(MarketplaceError::Forbidden("Only vendors have a purchase history".to_string()));
        }
        self.db.orders_for_vendor(user.id).await
    }

    /// The farmer's sales history: every order against one of their listings, newest first.
    pub async fn sales(&self, user: &UserIdentity) -> Result<Vec<OrderHistoryRow>, MarketplaceError> {
        if !user.is_farmer() {
            return Err(MarketplaceError::Forbidden("Only farmers have a sales history".to_string()));
        }
        self.db.orders_for_farmer(user.id).await
    }

    /// Moves an order along its lifecycle. Only the farmer who listed the underlying product may
    /// call this, and only edges allowed by [`OrderStatusType::can_transition_to`] are accepted.
    pub async fn update_status(
        &self,
        user: &UserIdentity,
        order_id: i64,
        new_status: &str,
    ) -> Result<Order, MarketplaceError> {
        if !user.is_farmer() {
            return Err(MarketplaceError::Forbidden("Only farmers can update order status".to_string()));
        }
        let status = new_status.parse::<OrderStatusType>().map_err(MarketplaceError::invalid_status)?;
        let order = self.db.transition_order(user.id, order_id, status).await?;
        debug!("🔄️ Farmer #{} moved order #{order_id} to {status}", user.id);
        Ok(order)
    }
}
