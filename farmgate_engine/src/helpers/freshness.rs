//! The freshness engine.
//!
//! Freshness is a pure function of the harvest date, the expiry window and the clock. It is
//! recomputed on every read rather than persisted, so a listing's score, tier and smart-deal
//! discount always reflect elapsed time. Only `harvest_date` and `expiry_days` are stored.

use chrono::{DateTime, NaiveDate, Utc};
use fg_common::Money;

use crate::db_types::FreshnessStatus;

/// The flat smart-deal markdown applied once a product's freshness tier reaches Old.
const SMART_DEAL_PCT: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    /// 0-100 estimate of remaining shelf life.
    pub score: i64,
    pub status: FreshnessStatus,
    /// Populated iff `status` is Old.
    pub discount_price: Option<Money>,
}

impl Freshness {
    fn untracked() -> Self {
        Freshness { score: 100, status: FreshnessStatus::Fresh, discount_price: None }
    }
}

/// Computes the freshness score, tier and optional discounted price for a product.
///
/// When either the harvest date or the expiry window is absent, no freshness tracking is attempted
/// and the product reads as fully fresh. Elapsed days round *up*: produce harvested a few hours ago
/// already counts one elapsed day. A non-positive expiry window is inert rather than an error.
pub fn assess_freshness(
    harvest_date: Option<NaiveDate>,
    expiry_days: Option<i64>,
    base_price: Money,
    now: DateTime<Utc>,
) -> Freshness {
    let (Some(harvested), Some(expiry)) = (harvest_date, expiry_days) else {
        return Freshness::untracked();
    };
    if expiry <= 0 {
        return Freshness::untracked();
    }
    let harvested = harvested.and_hms_opt(0, 0, 0).expect("midnight is always a valid time").and_utc();
    let elapsed_secs = (now - harvested).num_seconds();
    let days_elapsed = (elapsed_secs as f64 / 86_400.0).ceil();
    let raw = 100.0 - (days_elapsed / expiry as f64) * 100.0;
    let score = (raw.round() as i64).clamp(0, 100);
    let status = FreshnessStatus::from_score(score);
    let discount_price = (status == FreshnessStatus::Old).then(|| base_price.percent(SMART_DEAL_PCT));
    Freshness { score, status, discount_price }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().unwrap()
    }

    fn harvested_days_ago(days: i64) -> Option<NaiveDate> {
        Some((now() - Duration::days(days)).date_naive())
    }

    #[test]
    fn untracked_products_read_fully_fresh() {
        let f = assess_freshness(None, Some(10), Money::from(1_000), now());
        assert_eq!(f, Freshness::untracked());
        let f = assess_freshness(harvested_days_ago(3), None, Money::from(1_000), now());
        assert_eq!(f, Freshness::untracked());
    }

    #[test]
    fn degenerate_expiry_window_is_inert() {
        let f = assess_freshness(harvested_days_ago(5), Some(0), Money::from(1_000), now());
        assert_eq!(f.score, 100);
        let f = assess_freshness(harvested_days_ago(5), Some(-2), Money::from(1_000), now());
        assert_eq!(f.score, 100);
        assert!(f.discount_price.is_none());
    }

    #[test]
    fn partial_days_round_up() {
        // Harvested this morning: the half-elapsed day already counts as one.
        let f = assess_freshness(Some(now().date_naive()), Some(10), Money::from(1_000), now());
        assert_eq!(f.score, 90);
        assert_eq!(f.status, FreshnessStatus::Fresh);
    }

    #[test]
    fn score_decays_linearly_over_the_window() {
        let f = assess_freshness(harvested_days_ago(4), Some(10), Money::from(1_000), now());
        // 5 elapsed days (4 whole plus the partial) over a 10-day window
        assert_eq!(f.score, 50);
        assert_eq!(f.status, FreshnessStatus::Aging);
        assert!(f.discount_price.is_none());
    }

    #[test]
    fn old_produce_gets_the_smart_deal_discount() {
        let f = assess_freshness(harvested_days_ago(7), Some(10), Money::from(1_999), now());
        assert_eq!(f.score, 20);
        assert_eq!(f.status, FreshnessStatus::Old);
        // exactly 80% of the base price, rounded to the centavo
        assert_eq!(f.discount_price, Some(Money::from(1_599)));
    }

    #[test]
    fn score_clamps_to_zero_past_expiry() {
        let f = assess_freshness(harvested_days_ago(40), Some(10), Money::from(1_000), now());
        assert_eq!(f.score, 0);
        assert_eq!(f.status, FreshnessStatus::Old);
    }

    #[test]
    fn future_harvest_dates_clamp_to_one_hundred() {
        let harvest = Some((now() + Duration::days(3)).date_naive());
        let f = assess_freshness(harvest, Some(10), Money::from(1_000), now());
        assert_eq!(f.score, 100);
        assert_eq!(f.status, FreshnessStatus::Fresh);
        assert!(f.discount_price.is_none());
    }

    #[test]
    fn discount_present_iff_old() {
        for days in 0..30 {
            let f = assess_freshness(harvested_days_ago(days), Some(14), Money::from(2_500), now());
            assert!((0..=100).contains(&f.score));
            assert_eq!(f.discount_price.is_some(), f.status == FreshnessStatus::Old);
        }
    }
}
