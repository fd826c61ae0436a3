//! Cash-flow discounting and price/yield conversion.
//!
//! Every analytic in this crate discounts through [`TimedCashFlows`]:
//!
//! ```text
//! PV(y) = Σ CF_i / (1 + y/f)^(f × t_i)
//! ```
//!
//! where `t_i` is the year fraction from settlement to payment `i` under the
//! bond's day count and `f` the compounding frequency. Only flows strictly
//! after settlement take part.

use bondlab_core::calendars::{HolidayCalendar, WeekendCalendar};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::precision;
use bondlab_core::types::{CashFlow, Date, Frequency};
use bondlab_core::CoreResult;
use rust_decimal::Decimal;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::risk::accrued_interest;

/// A future cash flow together with its time from settlement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedCashFlow {
    flow: CashFlow,
    years: Decimal,
}

impl TimedCashFlow {
    /// The underlying schedule entry.
    #[must_use]
    pub fn flow(&self) -> &CashFlow {
        &self.flow
    }

    /// Year fraction from settlement to payment.
    #[must_use]
    pub fn years(&self) -> Decimal {
        self.years
    }

    /// Total amount paid.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.flow.total()
    }
}

/// The future part of a schedule, timed from a settlement date.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedCashFlows {
    settlement: Date,
    frequency: Frequency,
    day_count: DayCountConvention,
    flows: Vec<TimedCashFlow>,
}

impl TimedCashFlows {
    /// Keeps the flows dated after `settlement` and times them.
    ///
    /// # Errors
    ///
    /// `NoFutureCashFlows` when nothing is paid after settlement.
    pub fn new(
        cash_flows: &[CashFlow],
        settlement: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> AnalyticsResult<Self> {
        Self::with_calendar(cash_flows, settlement, frequency, day_count, &WeekendCalendar)
    }

    /// Like [`new`](Self::new), counting BUS/252 time on `calendar`.
    pub fn with_calendar(
        cash_flows: &[CashFlow],
        settlement: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
        calendar: &dyn HolidayCalendar,
    ) -> AnalyticsResult<Self> {
        let flows = cash_flows
            .iter()
            .filter(|cf| cf.date() > settlement)
            .map(|cf| {
                Ok(TimedCashFlow {
                    flow: *cf,
                    years: day_count.year_fraction_with(settlement, cf.date(), calendar)?,
                })
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        if flows.is_empty() {
            return Err(AnalyticsError::NoFutureCashFlows {
                settlement: settlement.to_string(),
            });
        }

        Ok(Self {
            settlement,
            frequency,
            day_count,
            flows,
        })
    }

    /// Settlement date the flows are timed from.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Compounding frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Day count used for timing.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// The timed flows in payment order.
    #[must_use]
    pub fn flows(&self) -> &[TimedCashFlow] {
        &self.flows
    }

    /// Compounding periods per year as a decimal.
    #[must_use]
    pub fn periods_per_year(&self) -> Decimal {
        Decimal::from(self.frequency.periods_per_year())
    }

    /// `1 + y/f`.
    pub fn compounding_base(&self, yield_rate: Decimal) -> CoreResult<Decimal> {
        precision::add(
            Decimal::ONE,
            precision::div(yield_rate, self.periods_per_year())?,
        )
    }

    /// Discount factor for each flow at `yield_rate`.
    pub fn discount_factors(&self, yield_rate: Decimal) -> CoreResult<Vec<Decimal>> {
        let base = self.compounding_base(yield_rate)?;
        let f = self.periods_per_year();
        self.flows
            .iter()
            .map(|tf| precision::discount_factor(base, precision::mul(f, tf.years)?))
            .collect()
    }

    /// Present value of the flows at a flat yield.
    pub fn present_value(&self, yield_rate: Decimal) -> CoreResult<Decimal> {
        let dfs = self.discount_factors(yield_rate)?;
        self.flows.iter().zip(dfs).try_fold(Decimal::ZERO, |pv, (tf, df)| {
            precision::add(pv, precision::mul(tf.amount(), df)?)
        })
    }

    /// First derivative of [`present_value`](Self::present_value) in the yield.
    ///
    /// `dPV/dy = -Σ t_i × PV_i / (1 + y/f)`
    pub fn pv_derivative(&self, yield_rate: Decimal) -> CoreResult<Decimal> {
        let base = self.compounding_base(yield_rate)?;
        let dfs = self.discount_factors(yield_rate)?;
        let weighted = self.flows.iter().zip(dfs).try_fold(Decimal::ZERO, |acc, (tf, df)| {
            precision::add(acc, precision::mul(tf.years, precision::mul(tf.amount(), df)?)?)
        })?;
        Ok(-precision::div(weighted, base)?)
    }

    /// Undiscounted sum of all future flows.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.flows.iter().map(TimedCashFlow::amount).sum()
    }

    /// Cash-weighted average time to payment, in years.
    pub fn weighted_average_time(&self) -> CoreResult<Decimal> {
        let weighted: Decimal = self.flows.iter().map(|tf| tf.amount() * tf.years).sum();
        precision::div(weighted, self.total_amount())
    }

    /// Time of the final flow, in years.
    #[must_use]
    pub fn final_time(&self) -> Decimal {
        self.flows.last().map_or(Decimal::ZERO, |tf| tf.years)
    }
}

/// Present value (dirty amount, currency units) of a schedule at a flat yield.
///
/// # Errors
///
/// `NoFutureCashFlows` when nothing is paid after settlement, or a
/// precision error from the discounting.
pub fn present_value(
    cash_flows: &[CashFlow],
    settlement: Date,
    yield_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
) -> AnalyticsResult<Decimal> {
    let timed = TimedCashFlows::new(cash_flows, settlement, frequency, day_count)?;
    Ok(timed.present_value(yield_rate)?)
}

/// Dirty price at a flat yield, in percent of `notional`.
pub fn dirty_price_from_yield(
    cash_flows: &[CashFlow],
    settlement: Date,
    yield_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
    notional: Decimal,
) -> AnalyticsResult<Decimal> {
    let pv = present_value(cash_flows, settlement, yield_rate, frequency, day_count)?;
    Ok(precision::div(pv * Decimal::ONE_HUNDRED, notional)?)
}

/// Clean price at a flat yield, in percent of `notional`.
///
/// Accrued interest is taken from the schedule itself, so it is zero when
/// settlement precedes the first accrual period the schedule knows about.
pub fn clean_price_from_yield(
    cash_flows: &[CashFlow],
    settlement: Date,
    yield_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
    notional: Decimal,
) -> AnalyticsResult<Decimal> {
    let dirty = dirty_price_from_yield(
        cash_flows, settlement, yield_rate, frequency, day_count, notional,
    )?;
    let accrued = accrued_interest(cash_flows, settlement, day_count, None)?;
    Ok(dirty - precision::div(accrued * Decimal::ONE_HUNDRED, notional)?)
}

/// Second-order price change estimate for a yield move.
///
/// ```text
/// ΔP ≈ P × (-D_mod × Δy + ½ × C × Δy²)
/// ```
#[must_use]
pub fn estimate_price_change(
    price: Decimal,
    modified_duration: Decimal,
    convexity: Decimal,
    yield_change: Decimal,
) -> Decimal {
    let first = -modified_duration * yield_change;
    let second = convexity * yield_change * yield_change / Decimal::TWO;
    price * (first + second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondlab_core::types::CashFlowKind;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    /// Two-year 5% semi-annual bullet on 100 face.
    fn bullet() -> Vec<CashFlow> {
        let dates = ["2025-07-15", "2026-01-15", "2026-07-15", "2027-01-15"];
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let last = i == dates.len() - 1;
                let (principal, remaining, kind) = if last {
                    (dec!(100), Decimal::ZERO, CashFlowKind::Maturity)
                } else {
                    (Decimal::ZERO, dec!(100), CashFlowKind::Coupon)
                };
                CashFlow::new(date(d), dec!(2.5), principal, remaining, kind)
            })
            .collect()
    }

    #[test]
    fn test_par_bond_prices_at_par() {
        let pv = present_value(
            &bullet(),
            date("2025-01-15"),
            dec!(0.05),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
        )
        .unwrap();
        assert!(precision::approx_eq(pv, dec!(100), dec!(0.0000000001)));
    }

    #[test]
    fn test_flows_on_settlement_are_excluded() {
        let timed = TimedCashFlows::new(
            &bullet(),
            date("2025-07-15"),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
        )
        .unwrap();
        assert_eq!(timed.flows().len(), 3);
        assert_eq!(timed.flows()[0].years(), dec!(0.5));
    }

    #[test]
    fn test_no_future_flows() {
        let err = TimedCashFlows::new(
            &bullet(),
            date("2027-01-15"),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::NoFutureCashFlows { .. }));
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let timed = TimedCashFlows::new(
            &bullet(),
            date("2025-03-01"),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
        )
        .unwrap();
        let y = dec!(0.04);
        let h = dec!(0.000001);
        let numeric = (timed.present_value(y + h).unwrap() - timed.present_value(y - h).unwrap())
            / (Decimal::TWO * h);
        let analytic = timed.pv_derivative(y).unwrap();
        assert_relative_eq!(
            precision::to_display_f64(analytic),
            precision::to_display_f64(numeric),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_clean_and_dirty_prices() {
        let flows = bullet();
        let settlement = date("2025-04-15");
        let dirty = dirty_price_from_yield(
            &flows,
            settlement,
            dec!(0.05),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
            dec!(100),
        )
        .unwrap();
        let clean = clean_price_from_yield(
            &flows,
            settlement,
            dec!(0.05),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360,
            dec!(100),
        )
        .unwrap();
        // No accrual start is known before the first flow
        assert_eq!(clean, dirty);
        assert!(dirty > dec!(100));
    }

    #[test]
    fn test_estimate_price_change() {
        let change = estimate_price_change(dec!(100), dec!(5), dec!(30), dec!(0.01));
        assert_eq!(change, dec!(-4.85));
    }
}
