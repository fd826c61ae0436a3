//! Structural validation of bond terms.
//!
//! Validation never stops at the first problem: every error and warning is
//! collected into a [`ValidationReport`] so callers can show the full list.

use bondlab_core::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::BondTerms;

/// Highest admissible annual coupon rate in percent.
pub const MAX_COUPON_RATE: Decimal = dec!(50);

/// Limits applied to amortization schedules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleLimits {
    /// Total amortization at or above this percentage is reported as a warning.
    pub amortization_warn_pct: Decimal,
    /// Total amortization above this percentage is rejected.
    pub amortization_max_pct: Decimal,
    /// Window in days for matching a rule date to a nearby payment date.
    pub match_window_days: i64,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self {
            amortization_warn_pct: dec!(90),
            amortization_max_pct: dec!(100.01),
            match_window_days: 180,
        }
    }
}

/// Outcome of [`BondTerms::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub valid: bool,
    /// Structural problems that prevent analysis.
    pub errors: Vec<String>,
    /// Suspicious but admissible features.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

impl BondTerms {
    /// Validates the terms against the default [`ScheduleLimits`].
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        self.validate_with(&ScheduleLimits::default())
    }

    /// Validates date ordering, rate bounds and schedule sums.
    #[must_use]
    pub fn validate_with(&self, limits: &ScheduleLimits) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let issue = self.issue_date();
        let maturity = self.maturity_date();

        if maturity <= issue {
            errors.push(format!(
                "maturity date {maturity} must be after issue date {issue}"
            ));
        }

        check_rate(&mut errors, "coupon rate", self.coupon_rate());
        for rule in self.coupon_changes() {
            check_rate(
                &mut errors,
                &format!("coupon rate effective {}", rule.effective_date),
                rule.rate,
            );
            if rule.effective_date <= issue {
                warnings.push(format!(
                    "coupon change effective {} applies from issue",
                    rule.effective_date
                ));
            } else if rule.effective_date > maturity {
                warnings.push(format!(
                    "coupon change effective {} is after maturity and never applies",
                    rule.effective_date
                ));
            }
        }

        if let Some(first) = self.first_coupon_date() {
            if !in_window(first, issue, maturity) {
                errors.push(format!(
                    "first coupon date {first} must lie in ({issue}, {maturity}]"
                ));
            }
        }

        errors.extend(schedule_errors(self, limits));

        for pair in self.amortization().windows(2) {
            if pair[0].date == pair[1].date {
                warnings.push(format!(
                    "multiple amortization rules on {}",
                    pair[0].date
                ));
            }
        }

        let total = self.total_amortization_pct();
        if total >= limits.amortization_warn_pct && total <= limits.amortization_max_pct {
            warnings.push(format!(
                "amortization totals {total}% of face value"
            ));
        }

        for (label, date, price) in self
            .calls()
            .iter()
            .map(|c| ("call", c.date, c.price_pct))
            .chain(self.puts().iter().map(|p| ("put", p.date, p.price_pct)))
        {
            if price <= Decimal::ZERO {
                errors.push(format!("{label} price on {date} must be positive"));
            }
        }

        ValidationReport::from_parts(errors, warnings)
    }
}

/// Schedule-level problems that make cash-flow generation impossible.
///
/// Shared by [`BondTerms::validate_with`] and the scheduler, which raises
/// the first of these as `InvalidSchedule`.
pub fn schedule_errors(terms: &BondTerms, limits: &ScheduleLimits) -> Vec<String> {
    let mut errors = Vec::new();
    let issue = terms.issue_date();
    let maturity = terms.maturity_date();

    if terms.face_value() <= Decimal::ZERO {
        errors.push(format!(
            "face value must be positive, got {}",
            terms.face_value()
        ));
    }
    for rule in terms.amortization() {
        if rule.principal_pct <= Decimal::ZERO {
            errors.push(format!(
                "amortization on {} must be positive, got {}%",
                rule.date, rule.principal_pct
            ));
        }
    }

    let total = terms.total_amortization_pct();
    if total > limits.amortization_max_pct {
        errors.push(format!(
            "amortization totals {total}% of face value, above the {}% limit",
            limits.amortization_max_pct
        ));
    }

    let dated = terms
        .amortization()
        .iter()
        .map(|r| ("amortization", r.date))
        .chain(terms.calls().iter().map(|c| ("call", c.date)))
        .chain(terms.puts().iter().map(|p| ("put", p.date)));
    for (label, date) in dated {
        if !in_window(date, issue, maturity) {
            errors.push(format!(
                "{label} date {date} must lie in ({issue}, {maturity}]"
            ));
        }
    }

    errors
}

fn in_window(date: Date, issue: Date, maturity: Date) -> bool {
    date > issue && date <= maturity
}

fn check_rate(errors: &mut Vec<String>, label: &str, rate: Decimal) {
    if rate < Decimal::ZERO || rate > MAX_COUPON_RATE {
        errors.push(format!(
            "{label} must be within [0, {MAX_COUPON_RATE}]%, got {rate}%"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn base() -> crate::types::BondTermsBuilder {
        BondTerms::builder()
            .face_value(dec!(1000))
            .coupon_rate(dec!(5))
            .issue_date(date(2025, 1, 15))
            .maturity_date(date(2030, 1, 15))
    }

    #[test]
    fn test_vanilla_is_valid() {
        let report = base().build().unwrap().validate();
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let report = BondTerms::builder()
            .face_value(dec!(0))
            .coupon_rate(dec!(60))
            .issue_date(date(2030, 1, 15))
            .maturity_date(date(2025, 1, 15))
            .build()
            .unwrap()
            .validate();

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_amortization_thresholds() {
        let warned = base()
            .amortization(date(2027, 1, 15), dec!(45))
            .amortization(date(2028, 1, 15), dec!(50))
            .build()
            .unwrap()
            .validate();
        assert!(warned.valid);
        assert_eq!(warned.warnings.len(), 1);

        let rejected = base()
            .amortization(date(2027, 1, 15), dec!(60))
            .amortization(date(2028, 1, 15), dec!(41))
            .build()
            .unwrap()
            .validate();
        assert!(!rejected.valid);
    }

    #[test]
    fn test_rule_dates_must_lie_in_life() {
        let report = base()
            .amortization(date(2025, 1, 15), dec!(10))
            .call(date(2031, 1, 15), dec!(100))
            .put(date(2030, 1, 15), dec!(100))
            .build()
            .unwrap()
            .validate();

        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_sign_errors_are_schedule_errors() {
        let terms = BondTerms::builder()
            .face_value(dec!(-1000))
            .coupon_rate(dec!(5))
            .issue_date(date(2025, 1, 15))
            .maturity_date(date(2030, 1, 15))
            .amortization(date(2027, 1, 15), dec!(-10))
            .build()
            .unwrap();

        let errors = schedule_errors(&terms, &ScheduleLimits::default());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("face value"));
        assert!(errors[1].contains("amortization on 2027-01-15"));
    }

    #[test]
    fn test_coupon_change_warnings() {
        let report = base()
            .coupon_change(date(2024, 1, 1), dec!(4))
            .coupon_change(date(2031, 1, 1), dec!(6))
            .build()
            .unwrap()
            .validate();

        assert!(report.valid);
        assert_eq!(report.warnings.len(), 2);
    }
}
