//! Boundary conversion from loosely-typed bond definitions.
//!
//! Bond definitions arrive from files and API payloads with string dates,
//! numeric frequencies and a handful of legacy field names. They are decoded
//! into [`BondTermsInput`] and converted once into [`BondTerms`]; nothing
//! downstream sees the loose form.

use std::str::FromStr;

use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::{Currency, Date, Frequency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};
use crate::types::rules::{AmortizationRule, CallEntry, CouponChangeRule, PutEntry};
use crate::types::terms::BondTerms;

/// A bond definition as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondTermsInput {
    /// Identifier.
    #[serde(alias = "bond_id", alias = "isin")]
    pub id: Option<String>,
    /// Issuer name.
    #[serde(alias = "issuer_name")]
    pub issuer: Option<String>,
    /// Face value.
    #[serde(alias = "face", alias = "par_value")]
    pub face_value: Option<Decimal>,
    /// Annual coupon rate in percent.
    #[serde(alias = "coupon")]
    pub coupon_rate: Option<Decimal>,
    /// Issue date (`YYYY-MM-DD`).
    #[serde(alias = "issue")]
    pub issue_date: Option<String>,
    /// Maturity date (`YYYY-MM-DD`).
    #[serde(alias = "maturity")]
    pub maturity_date: Option<String>,
    /// First coupon date (`YYYY-MM-DD`).
    #[serde(alias = "first_coupon")]
    pub first_coupon_date: Option<String>,
    /// Coupon payments per year.
    #[serde(alias = "payments_per_year")]
    pub frequency: Option<u32>,
    /// Day count convention name.
    #[serde(alias = "day_count_convention")]
    pub day_count: Option<String>,
    /// ISO currency code.
    pub currency: Option<String>,
    /// Settlement lag in business days.
    #[serde(alias = "settlement_days")]
    pub settlement_lag: Option<u32>,
    /// End-of-month rule.
    pub end_of_month: Option<bool>,
    /// Amortization rules.
    #[serde(alias = "amortization_schedule")]
    pub amortization: Vec<DatedPercentInput>,
    /// Coupon change rules.
    #[serde(alias = "coupon_schedule", alias = "step_ups")]
    pub coupon_changes: Vec<DatedPercentInput>,
    /// Call schedule.
    #[serde(alias = "call_schedule")]
    pub calls: Vec<DatedPercentInput>,
    /// Put schedule.
    #[serde(alias = "put_schedule")]
    pub puts: Vec<DatedPercentInput>,
}

/// A dated percentage: amortization, new coupon rate, or exercise price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPercentInput {
    /// Date (`YYYY-MM-DD`).
    #[serde(alias = "effective_date")]
    pub date: String,
    /// Percentage value.
    #[serde(alias = "principal_pct", alias = "rate", alias = "price", alias = "price_pct")]
    pub percent: Decimal,
}

impl BondTermsInput {
    /// Decodes a JSON bond definition.
    pub fn from_json(json: &str) -> BondResult<Self> {
        serde_json::from_str(json).map_err(|e| BondError::Decode {
            reason: e.to_string(),
        })
    }

    /// Converts into [`BondTerms`], using `end_of_month_default` when the
    /// definition does not say.
    ///
    /// Every malformed field is reported, not just the first.
    pub fn into_terms(self, end_of_month_default: bool) -> BondResult<BondTerms> {
        let mut errors = Vec::new();

        let issue = required_date(&mut errors, "issue_date", self.issue_date.as_deref());
        let maturity = required_date(&mut errors, "maturity_date", self.maturity_date.as_deref());
        let first_coupon = self
            .first_coupon_date
            .as_deref()
            .and_then(|s| parse_date(&mut errors, "first_coupon_date", s));

        let coupon_rate = self.coupon_rate.or_else(|| {
            errors.push("missing coupon_rate".to_string());
            None
        });

        let frequency = self.frequency.and_then(|n| match Frequency::from_periods(n) {
            Ok(f) => Some(f),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        });

        let day_count = self.day_count.as_deref().and_then(|s| {
            match DayCountConvention::from_str(s) {
                Ok(dc) => Some(dc),
                Err(e) => {
                    errors.push(e.to_string());
                    None
                }
            }
        });

        let currency = self.currency.as_deref().and_then(|code| {
            let parsed = Currency::from_code(code);
            if parsed.is_none() {
                errors.push(format!("unknown currency '{code}'"));
            }
            parsed
        });

        let amortization = dated(&mut errors, "amortization", &self.amortization)
            .into_iter()
            .map(|(d, p)| AmortizationRule::new(d, p))
            .collect::<Vec<_>>();
        let coupon_changes = dated(&mut errors, "coupon change", &self.coupon_changes)
            .into_iter()
            .map(|(d, r)| CouponChangeRule::new(d, r))
            .collect::<Vec<_>>();
        let calls = dated(&mut errors, "call", &self.calls)
            .into_iter()
            .map(|(d, p)| CallEntry::new(d, p))
            .collect::<Vec<_>>();
        let puts = dated(&mut errors, "put", &self.puts)
            .into_iter()
            .map(|(d, p)| PutEntry::new(d, p))
            .collect::<Vec<_>>();

        if !errors.is_empty() {
            return Err(BondError::invalid_terms(errors));
        }

        let mut builder = BondTerms::builder()
            .amortization_rules(amortization)
            .coupon_change_rules(coupon_changes)
            .end_of_month(self.end_of_month.unwrap_or(end_of_month_default));
        for call in calls {
            builder = builder.call(call.date, call.price_pct);
        }
        for put in puts {
            builder = builder.put(put.date, put.price_pct);
        }
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(issuer) = self.issuer {
            builder = builder.issuer(issuer);
        }
        if let Some(face) = self.face_value {
            builder = builder.face_value(face);
        }
        if let Some(rate) = coupon_rate {
            builder = builder.coupon_rate(rate);
        }
        if let Some(date) = issue {
            builder = builder.issue_date(date);
        }
        if let Some(date) = maturity {
            builder = builder.maturity_date(date);
        }
        if let Some(date) = first_coupon {
            builder = builder.first_coupon_date(date);
        }
        if let Some(f) = frequency {
            builder = builder.frequency(f);
        }
        if let Some(dc) = day_count {
            builder = builder.day_count(dc);
        }
        if let Some(ccy) = currency {
            builder = builder.currency(ccy);
        }
        if let Some(lag) = self.settlement_lag {
            builder = builder.settlement_lag(lag);
        }

        builder.build()
    }
}

impl TryFrom<BondTermsInput> for BondTerms {
    type Error = BondError;

    fn try_from(input: BondTermsInput) -> BondResult<Self> {
        input.into_terms(true)
    }
}

impl BondTerms {
    /// Decodes and converts a JSON bond definition.
    pub fn from_json(json: &str) -> BondResult<Self> {
        BondTermsInput::from_json(json)?.try_into()
    }
}

fn parse_date(errors: &mut Vec<String>, field: &str, value: &str) -> Option<Date> {
    match Date::parse(value) {
        Ok(d) => Some(d),
        Err(e) => {
            errors.push(format!("{field}: {e}"));
            None
        }
    }
}

fn required_date(errors: &mut Vec<String>, field: &str, value: Option<&str>) -> Option<Date> {
    match value {
        Some(s) => parse_date(errors, field, s),
        None => {
            errors.push(format!("missing {field}"));
            None
        }
    }
}

fn dated(
    errors: &mut Vec<String>,
    label: &str,
    entries: &[DatedPercentInput],
) -> Vec<(Date, Decimal)> {
    entries
        .iter()
        .filter_map(|e| parse_date(errors, label, &e.date).map(|d| (d, e.percent)))
        .collect()
}
