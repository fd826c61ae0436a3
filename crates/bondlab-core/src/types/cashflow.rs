//! Schedule entries produced by the cash-flow scheduler.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Kind of payment a schedule entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowKind {
    /// Coupon only
    Coupon,
    /// Coupon plus a scheduled partial principal repayment
    Amortization,
    /// Final repayment of all remaining principal
    Maturity,
    /// Redemption at a call date
    Call,
    /// Redemption at a put date
    Put,
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "COUPON",
            CashFlowKind::Amortization => "AMORTIZATION",
            CashFlowKind::Maturity => "MATURITY",
            CashFlowKind::Call => "CALL",
            CashFlowKind::Put => "PUT",
        };
        write!(f, "{name}")
    }
}

/// One dated payment of a bond schedule, in currency units.
///
/// # Example
///
/// ```rust
/// use bondlab_core::types::{CashFlow, CashFlowKind, Date};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::new(
///     Date::from_ymd(2025, 6, 15).unwrap(),
///     dec!(25),
///     dec!(80),
///     dec!(920),
///     CashFlowKind::Amortization,
/// );
/// assert_eq!(cf.total(), dec!(105));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    coupon: Decimal,
    principal: Decimal,
    total: Decimal,
    remaining_notional: Decimal,
    kind: CashFlowKind,
    /// Start of the coupon accrual period ending on `date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accrual_start: Option<Date>,
}

impl CashFlow {
    /// Creates a cash flow whose total is `coupon + principal`.
    #[must_use]
    pub fn new(
        date: Date,
        coupon: Decimal,
        principal: Decimal,
        remaining_notional: Decimal,
        kind: CashFlowKind,
    ) -> Self {
        Self {
            date,
            coupon,
            principal,
            total: coupon + principal,
            remaining_notional,
            kind,
            accrual_start: None,
        }
    }

    /// Creates a cash flow with an explicitly stated total.
    ///
    /// Used for schedules captured from external documents; the stated total
    /// is kept as-is so that schedule validation can reject inconsistencies.
    #[must_use]
    pub fn from_parts(
        date: Date,
        coupon: Decimal,
        principal: Decimal,
        total: Decimal,
        remaining_notional: Decimal,
        kind: CashFlowKind,
    ) -> Self {
        Self {
            date,
            coupon,
            principal,
            total,
            remaining_notional,
            kind,
            accrual_start: None,
        }
    }

    /// Attaches the start of the accrual period.
    #[must_use]
    pub fn with_accrual_start(mut self, start: Date) -> Self {
        self.accrual_start = Some(start);
        self
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the coupon amount.
    #[must_use]
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Returns the principal amount.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the total amount paid on this date.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the notional outstanding after this payment.
    #[must_use]
    pub fn remaining_notional(&self) -> Decimal {
        self.remaining_notional
    }

    /// Returns the notional outstanding before this payment.
    #[must_use]
    pub fn notional_before(&self) -> Decimal {
        self.remaining_notional + self.principal
    }

    /// Returns the payment kind.
    #[must_use]
    pub fn kind(&self) -> CashFlowKind {
        self.kind
    }

    /// Returns the accrual period start, if known.
    #[must_use]
    pub fn accrual_start(&self) -> Option<Date> {
        self.accrual_start
    }

    /// Returns true if this entry repays principal.
    #[must_use]
    pub fn has_principal(&self) -> bool {
        self.principal > Decimal::ZERO
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} coupon={} principal={} remaining={}",
            self.date, self.kind, self.coupon, self.principal, self.remaining_notional
        )
    }
}
