//! Current yield.

use bondlab_core::precision;
use bondlab_core::types::{CashFlow, Date};
use rust_decimal::Decimal;

use crate::error::AnalyticsResult;

/// Annual coupon income divided by the clean amount.
///
/// Coupon income is the sum of coupons paid in the twelve months after
/// settlement. When the schedule ends before that horizon the full year
/// cannot be read from it and `annual_coupon_fallback` (outstanding
/// notional times the current rate) is used instead.
pub fn current_yield(
    cash_flows: &[CashFlow],
    settlement: Date,
    clean_amount: Decimal,
    annual_coupon_fallback: Decimal,
) -> AnalyticsResult<Decimal> {
    let horizon = settlement.add_months(12)?;
    let covers_year = cash_flows.last().is_some_and(|cf| cf.date() >= horizon);

    let income = if covers_year {
        cash_flows
            .iter()
            .filter(|cf| cf.date() > settlement && cf.date() <= horizon)
            .map(CashFlow::coupon)
            .sum()
    } else {
        annual_coupon_fallback
    };

    Ok(precision::div(income, clean_amount)?)
}
