//! Contractual bond terms.

use bondlab_core::calendars::{HolidayCalendar, WeekendCalendar};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::{Currency, Date, Frequency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{BondError, BondResult};
use crate::types::rules::{rate_on, AmortizationRule, CallEntry, CouponChangeRule, PutEntry};

/// Default settlement lag in business days.
pub const DEFAULT_SETTLEMENT_LAG: u32 = 2;

/// The contractual terms of a fixed-income instrument.
///
/// Immutable once built. Rule lists are kept sorted by date. Structural
/// checks live in [`BondTerms::validate`](crate::validation), so terms that
/// fail validation can still be inspected and reported on.
///
/// # Example
///
/// ```rust
/// use bondlab_bonds::prelude::*;
/// use bondlab_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .face_value(dec!(1000))
///     .coupon_rate(dec!(5))
///     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
///     .maturity_date(Date::from_ymd(2030, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// assert!(terms.validate().valid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondTerms {
    id: Option<String>,
    issuer: Option<String>,
    face_value: Decimal,
    coupon_rate: Decimal,
    issue_date: Date,
    maturity_date: Date,
    first_coupon_date: Option<Date>,
    frequency: Frequency,
    day_count: DayCountConvention,
    currency: Currency,
    settlement_lag: u32,
    end_of_month: bool,
    amortization: Vec<AmortizationRule>,
    coupon_changes: Vec<CouponChangeRule>,
    calls: Vec<CallEntry>,
    puts: Vec<PutEntry>,
}

impl BondTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::default()
    }

    /// Identifier used to look up persisted schedules.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Issuer name.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Original face value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Base annual coupon rate in percent.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Explicit first coupon date, if any.
    #[must_use]
    pub fn first_coupon_date(&self) -> Option<Date> {
        self.first_coupon_date
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Accrual day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Currency of denomination.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Settlement lag in business days.
    #[must_use]
    pub fn settlement_lag(&self) -> u32 {
        self.settlement_lag
    }

    /// Whether coupon dates follow the end-of-month rule.
    #[must_use]
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Amortization rules sorted by date.
    #[must_use]
    pub fn amortization(&self) -> &[AmortizationRule] {
        &self.amortization
    }

    /// Coupon change rules sorted by effective date.
    #[must_use]
    pub fn coupon_changes(&self) -> &[CouponChangeRule] {
        &self.coupon_changes
    }

    /// Call schedule sorted by date.
    #[must_use]
    pub fn calls(&self) -> &[CallEntry] {
        &self.calls
    }

    /// Put schedule sorted by date.
    #[must_use]
    pub fn puts(&self) -> &[PutEntry] {
        &self.puts
    }

    /// Returns true if the bond repays principal before maturity.
    #[must_use]
    pub fn is_amortizing(&self) -> bool {
        !self.amortization.is_empty()
    }

    /// Sum of all amortization percentages.
    #[must_use]
    pub fn total_amortization_pct(&self) -> Decimal {
        self.amortization.iter().map(|r| r.principal_pct).sum()
    }

    /// Annual coupon rate in percent in force on `date`.
    ///
    /// The scheduler looks this up on each payment date, so a change
    /// effective on a payment date sets the coupon of the period ending
    /// there, not the one starting there.
    #[must_use]
    pub fn coupon_rate_on(&self, date: Date) -> Decimal {
        rate_on(self.coupon_rate, &self.coupon_changes, date)
    }

    /// Months between regular coupon dates.
    #[must_use]
    pub fn period_months(&self) -> i32 {
        self.frequency.months_per_period() as i32
    }

    /// Settlement date for a trade, skipping weekends only.
    #[must_use]
    pub fn settlement_date(&self, trade_date: Date) -> Date {
        self.settlement_date_with(trade_date, &WeekendCalendar)
    }

    /// Settlement date for a trade under a holiday calendar.
    #[must_use]
    pub fn settlement_date_with(&self, trade_date: Date, calendar: &dyn HolidayCalendar) -> Date {
        calendar.add_business_days(trade_date, self.settlement_lag)
    }
}

/// Builder for [`BondTerms`].
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    id: Option<String>,
    issuer: Option<String>,
    face_value: Option<Decimal>,
    coupon_rate: Option<Decimal>,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    first_coupon_date: Option<Date>,
    frequency: Option<Frequency>,
    day_count: Option<DayCountConvention>,
    currency: Option<Currency>,
    settlement_lag: Option<u32>,
    end_of_month: Option<bool>,
    amortization: Vec<AmortizationRule>,
    coupon_changes: Vec<CouponChangeRule>,
    calls: Vec<CallEntry>,
    puts: Vec<PutEntry>,
}

impl BondTermsBuilder {
    /// Sets the identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the issuer name.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the face value (default 100).
    #[must_use]
    pub fn face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annual coupon rate in percent.
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets an explicit first coupon date.
    #[must_use]
    pub fn first_coupon_date(mut self, date: Date) -> Self {
        self.first_coupon_date = Some(date);
        self
    }

    /// Sets the coupon frequency (default semi-annual).
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the day count convention (default 30/360).
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the currency (default USD).
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the settlement lag in business days.
    #[must_use]
    pub fn settlement_lag(mut self, days: u32) -> Self {
        self.settlement_lag = Some(days);
        self
    }

    /// Enables or disables the end-of-month rule (default enabled).
    #[must_use]
    pub fn end_of_month(mut self, enabled: bool) -> Self {
        self.end_of_month = Some(enabled);
        self
    }

    /// Adds an amortization rule.
    #[must_use]
    pub fn amortization(mut self, date: Date, principal_pct: Decimal) -> Self {
        self.amortization
            .push(AmortizationRule::new(date, principal_pct));
        self
    }

    /// Replaces the amortization rules.
    #[must_use]
    pub fn amortization_rules(mut self, rules: Vec<AmortizationRule>) -> Self {
        self.amortization = rules;
        self
    }

    /// Adds a coupon change rule.
    #[must_use]
    pub fn coupon_change(mut self, effective_date: Date, rate: Decimal) -> Self {
        self.coupon_changes
            .push(CouponChangeRule::new(effective_date, rate));
        self
    }

    /// Replaces the coupon change rules.
    #[must_use]
    pub fn coupon_change_rules(mut self, rules: Vec<CouponChangeRule>) -> Self {
        self.coupon_changes = rules;
        self
    }

    /// Adds a call date.
    #[must_use]
    pub fn call(mut self, date: Date, price_pct: Decimal) -> Self {
        self.calls.push(CallEntry::new(date, price_pct));
        self
    }

    /// Adds a put date.
    #[must_use]
    pub fn put(mut self, date: Date, price_pct: Decimal) -> Self {
        self.puts.push(PutEntry::new(date, price_pct));
        self
    }

    /// Builds the terms.
    ///
    /// Only presence of required fields is checked here; structural
    /// validation is reported by [`BondTerms::validate`].
    pub fn build(self) -> BondResult<BondTerms> {
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::missing_field("issue_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))?;

        let mut amortization = self.amortization;
        amortization.sort_by_key(|r| r.date);
        let mut coupon_changes = self.coupon_changes;
        coupon_changes.sort_by_key(|r| r.effective_date);
        let mut calls = self.calls;
        calls.sort_by_key(|c| c.date);
        let mut puts = self.puts;
        puts.sort_by_key(|p| p.date);

        Ok(BondTerms {
            id: self.id,
            issuer: self.issuer,
            face_value: self.face_value.unwrap_or(dec!(100)),
            coupon_rate,
            issue_date,
            maturity_date,
            first_coupon_date: self.first_coupon_date,
            frequency: self.frequency.unwrap_or_default(),
            day_count: self.day_count.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            settlement_lag: self.settlement_lag.unwrap_or(DEFAULT_SETTLEMENT_LAG),
            end_of_month: self.end_of_month.unwrap_or(true),
            amortization,
            coupon_changes,
            calls,
            puts,
        })
    }
}
