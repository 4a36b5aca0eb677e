use fg_common::Money;
use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewProduct, Product},
};

const PRODUCT_COLUMNS: &str = "id, farmer_id, product_name, description, price, price_each, price_kg, price_sack, \
                               unit_type, quantity, harvest_date, expiry_days, image_url, created_at";

/// Inserts a new product. This is not atomic on its own; embed the call inside a transaction and
/// pass `&mut *tx` as the connection argument if you need atomicity with other writes.
pub async fn insert_product(
    farmer_id: i64,
    product: &NewProduct,
    base_price: Money,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO products (
                farmer_id,
                product_name,
                description,
                price,
                price_each,
                price_kg,
                price_sack,
                unit_type,
                quantity,
                harvest_date,
                expiry_days,
                image_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING id;
        "#,
    )
    .bind(farmer_id)
    .bind(&product.product_name)
    .bind(&product.description)
    .bind(base_price)
    .bind(product.price_each)
    .bind(product.price_kg)
    .bind(product.price_sack)
    .bind(product.unit_type)
    .bind(product.quantity)
    .bind(product.harvest_date)
    .bind(product.expiry_days)
    .bind(&product.image_url)
    .fetch_one(&mut *conn)
    .await?;
    trace!("🌱️ Product #{id} ({}) saved for farmer #{farmer_id}", product.product_name);
    Ok(id)
}

pub async fn fetch_product(
    product_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, SqliteDatabaseError> {
    let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
    let product = sqlx::query_as::<_, Product>(&query).bind(product_id).fetch_optional(&mut *conn).await?;
    Ok(product)
}

/// All listings, newest first.
pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, SqliteDatabaseError> {
    let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
    let products = sqlx::query_as::<_, Product>(&query).fetch_all(&mut *conn).await?;
    Ok(products)
}

/// Decrements stock with a conditional update so the quantity can never go negative, even under
/// concurrent checkouts. Returns the number of affected rows: zero means the stock check failed
/// and the caller must abort its transaction.
pub async fn decrement_stock(
    product_id: i64,
    amount: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let result = sqlx::query("UPDATE products SET quantity = quantity - ?2 WHERE id = ?1 AND quantity >= ?2")
        .bind(product_id)
        .bind(amount)
        .execute(&mut *conn)
        .await?;
    trace!("🌱️ Stock decrement of {amount} on product #{product_id}: {} row(s)", result.rows_affected());
    Ok(result.rows_affected())
}

/// The currently available stock for a product, or `None` if the product does not exist.
pub async fn stock_of(product_id: i64, conn: &mut SqliteConnection) -> Result<Option<i64>, SqliteDatabaseError> {
    let stock = sqlx::query_scalar::<_, i64>("SELECT quantity FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(stock)
}

/// The id of the farmer who listed the product, or `None` if the product does not exist.
pub async fn owner_of(product_id: i64, conn: &mut SqliteConnection) -> Result<Option<i64>, SqliteDatabaseError> {
    let farmer_id = sqlx::query_scalar::<_, i64>("SELECT farmer_id FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(farmer_id)
}
