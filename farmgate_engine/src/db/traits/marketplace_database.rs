use crate::{
    db_types::{CheckoutDetails, Order, OrderStatusType},
    market_api::errors::MarketplaceError,
};

/// This trait defines the transactional behaviour for backends supporting the Farmgate engine.
///
/// This behaviour includes:
/// * Converting all of a vendor's cart lines into orders with the matching stock decrement.
/// * Direct single-product purchases that bypass the cart.
/// * Order status transitions gated by farmer ownership of the underlying product.
#[allow(async_fn_in_trait)]
pub trait MarketplaceDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Converts every cart line the vendor holds into one order per line, in a single atomic
    /// transaction:
    /// * every line's stock is validated before anything mutates; one short line aborts the lot,
    /// * the unit price is resolved against the product's live price table,
    /// * one `pending` order is inserted per line, sharing the checkout details,
    /// * the vendor's cart is cleared,
    /// * each product's stock is decremented with a conditional update so that a concurrent
    ///   checkout can never drive stock negative.
    ///
    /// An empty cart returns [`MarketplaceError::EmptyCart`]. A line whose quantity exceeds the
    /// available stock returns [`MarketplaceError::InsufficientStock`] and rolls everything back.
    ///
    /// Returns the created orders.
    async fn checkout_cart(
        &self,
        vendor_id: i64,
        details: &CheckoutDetails,
    ) -> Result<Vec<Order>, MarketplaceError>;

    /// Places an order for a single product without going through the cart, with the same
    /// stock-check-then-decrement atomicity as [`Self::checkout_cart`]. The unit price is the
    /// product's current smart-deal discount price when its freshness tier is Old, otherwise the
    /// base price.
    async fn create_direct_order(
        &self,
        vendor_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<Order, MarketplaceError>;

    /// Moves an order to `new_status`, verifying inside the same transaction that the requesting
    /// farmer owns the referenced product and that the edge is allowed by
    /// [`OrderStatusType::can_transition_to`]. On any failure the status is left unchanged.
    ///
    /// Returns the updated order.
    async fn transition_order(
        &self,
        farmer_id: i64,
        order_id: i64,
        new_status: OrderStatusType,
    ) -> Result<Order, MarketplaceError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), MarketplaceError> {
        Ok(())
    }
}
