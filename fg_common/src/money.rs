use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;

use crate::op;

//--------------------------------------       Money         ---------------------------------------------------------
/// A monetary amount in integer centavos. All price arithmetic in the marketplace happens in minor
/// units so that currency values never accumulate floating-point drift.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, AddAssign, add_assign);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}₱{}.{:02}", cents / 100, cents % 100)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_pesos(pesos: i64) -> Self {
        Self(pesos * 100)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the given percentage of this amount, rounded half-up to the nearest centavo.
    pub fn percent(&self, pct: i64) -> Self {
        let scaled = self.0 * pct;
        let rounded = if scaled >= 0 { (scaled + 50) / 100 } else { (scaled - 50) / 100 };
        Self(rounded)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_formats_centavos() {
        assert_eq!(Money::from(12_345).to_string(), "₱123.45");
        assert_eq!(Money::from_pesos(7).to_string(), "₱7.00");
        assert_eq!(Money::from(-250).to_string(), "-₱2.50");
    }

    #[test]
    fn percent_rounds_half_up() {
        // 20% markdown of ₱1.99 -> 80% of 199c = 159.2c -> 159c
        assert_eq!(Money::from(199).percent(80), Money::from(159));
        // 80% of 155c = 124c exactly
        assert_eq!(Money::from(155).percent(80), Money::from(124));
        // 80% of 99c = 79.2c -> 79c
        assert_eq!(Money::from(99).percent(80), Money::from(79));
        // half-up at the boundary: 50% of 3c = 1.5c -> 2c
        assert_eq!(Money::from(3).percent(50), Money::from(2));
    }

    #[test]
    fn sums_and_scales() {
        let total: Money = [Money::from(100), Money::from(250)].into_iter().sum();
        assert_eq!(total, Money::from(350));
        assert_eq!(Money::from(125) * 4, Money::from(500));
    }
}
