//! Accrued interest.

use bondlab_core::calendars::{HolidayCalendar, WeekendCalendar};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::precision;
use bondlab_core::types::{CashFlow, Date};
use rust_decimal::Decimal;

use crate::error::AnalyticsResult;

/// Coupon accrued from the start of the current period up to `settlement`.
///
/// The current period ends at the first payment after settlement. It
/// starts at the previous payment, or, for the first period, at the entry's
/// recorded accrual start or the supplied `issue_date`. With none of those
/// known, or when settlement precedes the period start, nothing has accrued.
///
/// ```text
/// accrued = next_coupon × DC(start, settlement) / DC(start, next)
/// ```
pub fn accrued_interest(
    cash_flows: &[CashFlow],
    settlement: Date,
    day_count: DayCountConvention,
    issue_date: Option<Date>,
) -> AnalyticsResult<Decimal> {
    accrued_interest_with(cash_flows, settlement, day_count, issue_date, &WeekendCalendar)
}

/// [`accrued_interest`] with BUS/252 days counted on `calendar`.
pub fn accrued_interest_with(
    cash_flows: &[CashFlow],
    settlement: Date,
    day_count: DayCountConvention,
    issue_date: Option<Date>,
    calendar: &dyn HolidayCalendar,
) -> AnalyticsResult<Decimal> {
    let Some(next_index) = cash_flows.iter().position(|cf| cf.date() > settlement) else {
        return Ok(Decimal::ZERO);
    };
    let next = &cash_flows[next_index];

    let start = match next_index.checked_sub(1) {
        Some(previous) => Some(cash_flows[previous].date()),
        None => next.accrual_start().or(issue_date),
    };
    let Some(start) = start else {
        return Ok(Decimal::ZERO);
    };
    if start > settlement {
        return Ok(Decimal::ZERO);
    }

    let elapsed = day_count.year_fraction_with(start, settlement, calendar)?;
    let period = day_count.year_fraction_with(start, next.date(), calendar)?;
    let fraction = precision::div(elapsed, period)?;
    Ok(precision::mul(next.coupon(), fraction)?)
}
