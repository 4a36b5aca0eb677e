use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewOrder, Order, OrderStatusType},
    market_api::OrderHistoryRow,
};

const ORDER_COLUMNS: &str = "id, vendor_id, product_id, quantity, total_price, payment_method, delivery_address, \
                             order_notes, status, created_at";

/// Inserts a new order in `pending` state and returns the stored row. Call inside the checkout
/// transaction so the order and the matching stock decrement land together or not at all.
pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<Order, SqliteDatabaseError> {
    let query = format!(
        r#"
            INSERT INTO orders (vendor_id, product_id, quantity, total_price, payment_method, delivery_address,
                                order_notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {ORDER_COLUMNS};
        "#
    );
    let order = sqlx::query_as::<_, Order>(&query)
        .bind(order.vendor_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .bind(&order.payment_method)
        .bind(&order.delivery_address)
        .bind(&order.order_notes)
        .fetch_one(&mut *conn)
        .await?;
    trace!("🔄️ Order #{} placed for product #{} ({} for {})", order.id, order.product_id, order.quantity, order.total_price);
    Ok(order)
}

pub async fn fetch_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
    let order = sqlx::query_as::<_, Order>(&query).bind(order_id).fetch_optional(&mut *conn).await?;
    Ok(order)
}

/// Writes the new status and returns the updated row. The caller has already validated the
/// transition against the lifecycle table.
pub async fn update_order_status(
    order_id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Order, SqliteDatabaseError> {
    let query = format!("UPDATE orders SET status = ?2 WHERE id = ?1 RETURNING {ORDER_COLUMNS}");
    let order = sqlx::query_as::<_, Order>(&query).bind(order_id).bind(status).fetch_one(&mut *conn).await?;
    trace!("🔄️ Order #{order_id} moved to {status}");
    Ok(order)
}

/// The vendor's purchase history, newest first.
pub async fn orders_for_vendor(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderHistoryRow>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderHistoryRow>(
        r#"
            SELECT
                o.id,
                o.vendor_id,
                p.product_name,
                o.quantity,
                o.total_price,
                o.payment_method,
                o.delivery_address,
                o.order_notes,
                o.status,
                o.created_at
            FROM orders o
            JOIN products p ON o.product_id = p.id
            WHERE o.vendor_id = ?1
            ORDER BY o.created_at DESC, o.id DESC;
        "#,
    )
    .bind(vendor_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Every order against the farmer's listings, newest first. Ownership comes from the product
/// join, so a farmer only ever sees sales of their own produce.
pub async fn orders_for_farmer(
    farmer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderHistoryRow>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderHistoryRow>(
        r#"
            SELECT
                o.id,
                o.vendor_id,
                p.product_name,
                o.quantity,
                o.total_price,
                o.payment_method,
                o.delivery_address,
                o.order_notes,
                o.status,
                o.created_at
            FROM orders o
            JOIN products p ON o.product_id = p.id
            WHERE p.farmer_id = ?1
            ORDER BY o.created_at DESC, o.id DESC;
        "#,
    )
    .bind(farmer_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
