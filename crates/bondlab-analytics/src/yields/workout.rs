//! Yield-to-call, yield-to-put and yield-to-worst.
//!
//! Each exercise scenario truncates the schedule at the exercise date and
//! replaces the remainder with one terminal flow: the coupon accrued up to
//! that date plus the outstanding notional redeemed at the exercise price.

use bondlab_bonds::BondTerms;
use bondlab_core::calendars::HolidayCalendar;
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::{CashFlow, CashFlowKind, Date};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::TimedCashFlows;
use crate::risk::accrued_interest_with;
use crate::yields::YieldSolver;

/// Result of solving one exercise scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExerciseOutcome {
    /// The yield was found.
    Solved {
        /// Yield as a decimal rate.
        yield_rate: Decimal,
    },
    /// The solver rejected the scenario.
    Failed {
        /// Why.
        reason: String,
    },
}

/// Yield to one call or put date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseYield {
    /// Exercise date.
    pub date: Date,
    /// `Call` or `Put`.
    pub kind: CashFlowKind,
    /// Exercise price in percent of outstanding notional.
    pub price_pct: Decimal,
    /// Solved yield or failure.
    pub outcome: ExerciseOutcome,
}

impl ExerciseYield {
    /// The solved yield, if any.
    #[must_use]
    pub fn yield_rate(&self) -> Option<Decimal> {
        match self.outcome {
            ExerciseOutcome::Solved { yield_rate } => Some(yield_rate),
            ExerciseOutcome::Failed { .. } => None,
        }
    }
}

/// Yield-to-worst and the scenario that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstYield {
    /// Lowest yield across maturity and every exercise date.
    pub yield_rate: Decimal,
    /// Redemption date of the worst scenario.
    pub date: Date,
    /// `Maturity`, `Call` or `Put`.
    pub kind: CashFlowKind,
    /// Every exercise scenario after settlement.
    pub exercises: Vec<ExerciseYield>,
}

/// Truncates a schedule at `exercise_date` and redeems the outstanding
/// notional there at `price_pct`.
///
/// # Errors
///
/// `InvalidInput` when the schedule has no payment on or after the
/// exercise date.
pub fn exercise_schedule(
    cash_flows: &[CashFlow],
    exercise_date: Date,
    price_pct: Decimal,
    kind: CashFlowKind,
    day_count: DayCountConvention,
    issue_date: Option<Date>,
    calendar: &dyn HolidayCalendar,
) -> AnalyticsResult<Vec<CashFlow>> {
    let index = cash_flows
        .iter()
        .position(|cf| cf.date() >= exercise_date)
        .ok_or_else(|| {
            AnalyticsError::invalid_input(format!(
                "exercise date {exercise_date} is after the final payment"
            ))
        })?;
    let spanning = &cash_flows[index];

    let coupon = if spanning.date() == exercise_date {
        spanning.coupon()
    } else {
        accrued_interest_with(cash_flows, exercise_date, day_count, issue_date, calendar)?
    };
    let redemption = spanning.notional_before() * price_pct / Decimal::ONE_HUNDRED;

    let accrual_start = match index.checked_sub(1) {
        Some(previous) => Some(cash_flows[previous].date()),
        None => spanning.accrual_start(),
    };
    let mut terminal = CashFlow::new(exercise_date, coupon, redemption, Decimal::ZERO, kind);
    if let Some(start) = accrual_start {
        terminal = terminal.with_accrual_start(start);
    }

    let mut truncated = cash_flows[..index].to_vec();
    truncated.push(terminal);
    Ok(truncated)
}

/// Yield to every call and put date after settlement, and the minimum of
/// those and `ytm`.
///
/// A scenario that cannot be solved is reported as
/// [`ExerciseOutcome::Failed`] and left out of the minimum.
pub fn yield_to_worst(
    terms: &BondTerms,
    cash_flows: &[CashFlow],
    settlement: Date,
    target_dirty: Decimal,
    ytm: Decimal,
    solver: &YieldSolver,
    calendar: &dyn HolidayCalendar,
) -> AnalyticsResult<WorstYield> {
    let scenarios = terms
        .calls()
        .iter()
        .map(|c| (c.date, c.price_pct, CashFlowKind::Call))
        .chain(terms.puts().iter().map(|p| (p.date, p.price_pct, CashFlowKind::Put)))
        .filter(|(date, _, _)| *date > settlement);

    let mut worst = WorstYield {
        yield_rate: ytm,
        date: terms.maturity_date(),
        kind: CashFlowKind::Maturity,
        exercises: Vec::new(),
    };

    for (date, price_pct, kind) in scenarios {
        let outcome = exercise_schedule(
            cash_flows,
            date,
            price_pct,
            kind,
            terms.day_count(),
            Some(terms.issue_date()),
            calendar,
        )
        .and_then(|flows| {
            TimedCashFlows::with_calendar(
                &flows,
                settlement,
                terms.frequency(),
                terms.day_count(),
                calendar,
            )
        })
        .and_then(|timed| solver.solve(&timed, target_dirty));

        let outcome = match outcome {
            Ok(solution) => {
                if solution.rate < worst.yield_rate {
                    worst.yield_rate = solution.rate;
                    worst.date = date;
                    worst.kind = kind;
                }
                ExerciseOutcome::Solved {
                    yield_rate: solution.rate,
                }
            }
            Err(err) => {
                warn!(%date, %kind, error = %err, "exercise yield not solved");
                ExerciseOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        worst.exercises.push(ExerciseYield {
            date,
            kind,
            price_pct,
            outcome,
        });
    }

    Ok(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlab_bonds::cashflows::generate;
    use bondlab_core::calendars::WeekendCalendar;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn callable() -> BondTerms {
        BondTerms::builder()
            .face_value(dec!(100))
            .coupon_rate(dec!(6))
            .issue_date(date("2025-01-15"))
            .maturity_date(date("2035-01-15"))
            .call(date("2028-01-15"), dec!(101))
            .call(date("2030-01-15"), dec!(100))
            .put(date("2027-04-15"), dec!(100))
            .build()
            .unwrap()
    }

    #[test]
    fn test_truncation_on_coupon_date() {
        let terms = callable();
        let flows = generate(&terms).unwrap();
        let truncated = exercise_schedule(
            &flows,
            date("2028-01-15"),
            dec!(101),
            CashFlowKind::Call,
            terms.day_count(),
            Some(terms.issue_date()),
            &WeekendCalendar,
        )
        .unwrap();

        assert_eq!(truncated.len(), 6);
        let last = truncated.last().unwrap();
        assert_eq!(last.kind(), CashFlowKind::Call);
        assert_eq!(last.coupon(), dec!(3));
        assert_eq!(last.principal(), dec!(101));
        assert_eq!(last.remaining_notional(), Decimal::ZERO);
    }

    #[test]
    fn test_truncation_mid_period_accrues() {
        let terms = callable();
        let flows = generate(&terms).unwrap();
        let truncated = exercise_schedule(
            &flows,
            date("2027-04-15"),
            dec!(100),
            CashFlowKind::Put,
            terms.day_count(),
            Some(terms.issue_date()),
            &WeekendCalendar,
        )
        .unwrap();

        assert_eq!(truncated.len(), 5);
        let last = truncated.last().unwrap();
        assert_eq!(last.coupon(), dec!(1.5));
        assert_eq!(last.principal(), dec!(100));
    }

    #[test]
    fn test_premium_bond_is_worst_to_call() {
        let terms = callable();
        let flows = generate(&terms).unwrap();
        let settlement = date("2025-01-15");
        let timed = TimedCashFlows::new(&flows, settlement, terms.frequency(), terms.day_count())
            .unwrap();
        let solver = YieldSolver::default();
        let ytm = solver.solve(&timed, dec!(110)).unwrap().rate;

        let worst = yield_to_worst(
            &terms,
            &flows,
            settlement,
            dec!(110),
            ytm,
            &solver,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(worst.exercises.len(), 3);
        assert!(worst.yield_rate < ytm);
        assert_ne!(worst.kind, CashFlowKind::Maturity);
        assert!(worst
            .exercises
            .iter()
            .filter_map(ExerciseYield::yield_rate)
            .all(|y| y >= worst.yield_rate));
    }

    #[test]
    fn test_without_options_worst_is_maturity() {
        let terms = BondTerms::builder()
            .coupon_rate(dec!(4))
            .issue_date(date("2025-01-15"))
            .maturity_date(date("2030-01-15"))
            .build()
            .unwrap();
        let flows = generate(&terms).unwrap();
        let worst = yield_to_worst(
            &terms,
            &flows,
            date("2025-01-15"),
            dec!(100),
            dec!(0.04),
            &YieldSolver::default(),
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(worst.yield_rate, dec!(0.04));
        assert_eq!(worst.kind, CashFlowKind::Maturity);
        assert!(worst.exercises.is_empty());
    }
}
