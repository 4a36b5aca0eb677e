pub mod freshness;
pub mod pricing;

pub use freshness::{assess_freshness, Freshness};
pub use pricing::{line_total, resolve_unit_price};
