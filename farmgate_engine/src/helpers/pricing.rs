//! Per-unit price resolution.
//!
//! Every price displayed or charged in the marketplace goes through [`resolve_unit_price`] so that
//! the price-table-with-legacy-fallback rule lives in exactly one place. The functions here are
//! pure: they read product state and never touch storage.

use fg_common::Money;

use crate::db_types::{PriceTable, UnitType};

/// Resolves the price of one unit of a product.
///
/// The price-table entry for the requested unit wins when it is populated and non-zero; otherwise
/// the legacy single-price column is used. Products created before the per-unit table existed only
/// populate the fallback, so it must always be honoured.
pub fn resolve_unit_price(prices: &PriceTable, unit: UnitType) -> Money {
    prices.entry(unit).filter(|p| !p.is_zero()).unwrap_or(prices.base)
}

/// The total for one cart or order line: unit price times quantity, in integer centavos.
pub fn line_total(prices: &PriceTable, unit: UnitType, quantity: i64) -> Money {
    resolve_unit_price(prices, unit) * quantity
}
