//! Schedule rules attached to bond terms.
//!
//! Percentages are expressed in percent (`8.0` = 8%), rates as annual
//! percentages (`5.125` = 5.125%).

use bondlab_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scheduled principal repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRule {
    /// Date the principal falls due.
    pub date: Date,
    /// Principal repaid, as a percentage of original face value.
    pub principal_pct: Decimal,
}

impl AmortizationRule {
    /// Creates a new amortization rule.
    #[must_use]
    pub fn new(date: Date, principal_pct: Decimal) -> Self {
        Self {
            date,
            principal_pct,
        }
    }

    /// Principal amount for a given face value.
    #[must_use]
    pub fn amount(&self, face_value: Decimal) -> Decimal {
        face_value * self.principal_pct / Decimal::ONE_HUNDRED
    }
}

/// A change of the annual coupon rate from an effective date onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponChangeRule {
    /// First date on which the new rate applies.
    pub effective_date: Date,
    /// New annual coupon rate in percent.
    pub rate: Decimal,
}

impl CouponChangeRule {
    /// Creates a new coupon change rule.
    #[must_use]
    pub fn new(effective_date: Date, rate: Decimal) -> Self {
        Self {
            effective_date,
            rate,
        }
    }
}

/// An issuer call date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntry {
    /// Exercise date.
    pub date: Date,
    /// Redemption price per 100 of notional outstanding on that date.
    pub price_pct: Decimal,
}

impl CallEntry {
    /// Creates a new call entry.
    #[must_use]
    pub fn new(date: Date, price_pct: Decimal) -> Self {
        Self { date, price_pct }
    }
}

/// A holder put date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutEntry {
    /// Exercise date.
    pub date: Date,
    /// Redemption price per 100 of notional outstanding on that date.
    pub price_pct: Decimal,
}

impl PutEntry {
    /// Creates a new put entry.
    #[must_use]
    pub fn new(date: Date, price_pct: Decimal) -> Self {
        Self { date, price_pct }
    }
}

/// Resolves the coupon rate in force on `date`.
///
/// `rules` must be sorted by effective date. Returns the rate of the last
/// rule effective on or before `date`, else `base_rate`.
#[must_use]
pub fn rate_on(base_rate: Decimal, rules: &[CouponChangeRule], date: Date) -> Decimal {
    rules
        .iter()
        .take_while(|rule| rule.effective_date <= date)
        .last()
        .map_or(base_rate, |rule| rule.rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_amortization_amount() {
        let rule = AmortizationRule::new(date(2026, 6, 30), dec!(8));
        assert_eq!(rule.amount(dec!(1000)), dec!(80));
    }

    #[test]
    fn test_rate_step_function() {
        let rules = [
            CouponChangeRule::new(date(2026, 1, 1), dec!(2)),
            CouponChangeRule::new(date(2027, 1, 1), dec!(4)),
        ];

        assert_eq!(rate_on(dec!(1), &rules, date(2025, 12, 31)), dec!(1));
        assert_eq!(rate_on(dec!(1), &rules, date(2026, 1, 1)), dec!(2));
        assert_eq!(rate_on(dec!(1), &rules, date(2026, 12, 31)), dec!(2));
        assert_eq!(rate_on(dec!(1), &rules, date(2030, 1, 1)), dec!(4));
    }

    #[test]
    fn test_rate_without_rules_is_base() {
        assert_eq!(rate_on(dec!(5), &[], date(2026, 1, 1)), dec!(5));
    }
}
