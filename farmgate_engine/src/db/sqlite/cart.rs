use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{CartLine, CartLineWithProduct, UnitType},
};

/// Adds a line to the vendor's cart, merging into an existing line when the (vendor, product,
/// unit) triple already exists. The unique index on that triple makes concurrent adds serialise
/// instead of racing into duplicate lines.
pub async fn upsert_line(
    vendor_id: i64,
    product_id: i64,
    quantity: i64,
    unit: UnitType,
    conn: &mut SqliteConnection,
) -> Result<CartLine, SqliteDatabaseError> {
    let line = sqlx::query_as::<_, CartLine>(
        r#"
            INSERT INTO cart_items (vendor_id, product_id, quantity, unit_type)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (vendor_id, product_id, unit_type)
            DO UPDATE SET quantity = quantity + excluded.quantity
            RETURNING id, vendor_id, product_id, quantity, unit_type;
        "#,
    )
    .bind(vendor_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit)
    .fetch_one(&mut *conn)
    .await?;
    trace!("🧺️ Cart line #{} for vendor #{vendor_id} now holds {} {unit}", line.id, line.quantity);
    Ok(line)
}

/// The vendor's cart lines joined with each product's live price table and stock. Pricing is
/// derived from this at read time, never frozen at add time.
pub async fn cart_lines_with_products(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<CartLineWithProduct>, SqliteDatabaseError> {
    let lines = sqlx::query_as::<_, CartLineWithProduct>(
        r#"
            SELECT
                c.id,
                c.vendor_id,
                c.product_id,
                c.quantity,
                c.unit_type,
                p.product_name,
                p.farmer_id,
                p.price,
                p.price_each,
                p.price_kg,
                p.price_sack,
                p.quantity AS stock,
                p.image_url
            FROM cart_items c
            JOIN products p ON c.product_id = p.id
            WHERE c.vendor_id = ?1
            ORDER BY c.id;
        "#,
    )
    .bind(vendor_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lines)
}

/// Deletes a line only when it belongs to the given vendor. Absent lines and lines owned by
/// someone else are deliberately indistinguishable: both are a no-op.
pub async fn delete_line(
    vendor_id: i64,
    line_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1 AND vendor_id = ?2")
        .bind(line_id)
        .bind(vendor_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn clear_cart(vendor_id: i64, conn: &mut SqliteConnection) -> Result<u64, SqliteDatabaseError> {
    let result =
        sqlx::query("DELETE FROM cart_items WHERE vendor_id = ?1").bind(vendor_id).execute(&mut *conn).await?;
    trace!("🧺️ Cleared {} cart line(s) for vendor #{vendor_id}", result.rows_affected());
    Ok(result.rows_affected())
}
