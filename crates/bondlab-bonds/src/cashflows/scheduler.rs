//! Cash-flow schedule generation.

use bondlab_core::calendars::{HolidayCalendar, WeekendCalendar};
use bondlab_core::daycounts::add_period;
use bondlab_core::types::{CashFlow, CashFlowKind, Date};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{BondError, BondResult};
use crate::types::BondTerms;
use crate::validation::{schedule_errors, ScheduleLimits};

/// Upper bound on generated periods (two centuries of monthly coupons).
const MAX_PERIODS: usize = 12 * 200;

/// A payment date and whether it closes a full regular period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaymentDate {
    date: Date,
    regular: bool,
}

/// Expands [`BondTerms`] into a dated, ordered cash-flow schedule.
///
/// Coupon dates are anchored on the first coupon date and stepped by
/// `12 / frequency` months with the end-of-month rule. Regular periods pay
/// `notional × rate / frequency`; a short or long first period and a final
/// stub ending at maturity pay `notional × rate × year_fraction` instead.
///
/// Amortization rules are matched to payment dates exactly, or failing
/// that to the nearest payment date in the same calendar year within
/// [`ScheduleLimits::match_window_days`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowScheduler {
    limits: ScheduleLimits,
}

impl CashFlowScheduler {
    /// Creates a scheduler with the given limits.
    #[must_use]
    pub fn new(limits: ScheduleLimits) -> Self {
        Self { limits }
    }

    /// Returns the schedule limits.
    #[must_use]
    pub fn limits(&self) -> &ScheduleLimits {
        &self.limits
    }

    /// Generates the full cash-flow schedule.
    ///
    /// The result has strictly increasing dates, non-increasing remaining
    /// notional, and exactly zero notional on its last entry.
    pub fn generate(&self, terms: &BondTerms) -> BondResult<Vec<CashFlow>> {
        self.generate_with(terms, &WeekendCalendar)
    }

    /// Generates the schedule with BUS/252 stub fractions counted on
    /// `calendar`.
    pub fn generate_with(
        &self,
        terms: &BondTerms,
        calendar: &dyn HolidayCalendar,
    ) -> BondResult<Vec<CashFlow>> {
        if terms.maturity_date() <= terms.issue_date() {
            return Err(BondError::invalid_terms(vec![format!(
                "maturity date {} must be after issue date {}",
                terms.maturity_date(),
                terms.issue_date()
            )]));
        }
        if let Some(reason) = schedule_errors(terms, &self.limits).into_iter().next() {
            return Err(BondError::invalid_schedule(reason));
        }

        let total = terms.total_amortization_pct();
        if total >= self.limits.amortization_warn_pct {
            warn!(
                total_pct = %total,
                warn_pct = %self.limits.amortization_warn_pct,
                "amortization approaches full face value"
            );
        }

        let dates = payment_dates(terms)?;
        let scheduled_pct = self.match_amortization(terms, &dates);

        let face = terms.face_value();
        let periods = Decimal::from(terms.frequency().periods_per_year());
        let day_count = terms.day_count();
        let last = dates.len() - 1;

        let mut flows = Vec::with_capacity(dates.len());
        let mut notional = face;
        let mut start = terms.issue_date();

        for (i, step) in dates.iter().enumerate() {
            let rate = terms.coupon_rate_on(step.date) / Decimal::ONE_HUNDRED;
            let coupon = if step.regular {
                notional * rate / periods
            } else {
                notional * rate * day_count.year_fraction_with(start, step.date, calendar)?
            };

            let principal = if i == last {
                notional
            } else {
                (face * scheduled_pct[i] / Decimal::ONE_HUNDRED).min(notional)
            };
            notional -= principal;

            let kind = if notional.is_zero() {
                CashFlowKind::Maturity
            } else if principal > Decimal::ZERO {
                CashFlowKind::Amortization
            } else {
                CashFlowKind::Coupon
            };

            flows.push(
                CashFlow::new(step.date, coupon, principal, notional, kind).with_accrual_start(start),
            );

            if notional.is_zero() {
                if i < last {
                    debug!(date = %step.date, "notional fully retired before maturity");
                }
                break;
            }
            start = step.date;
        }

        repair_residual(&mut flows, terms, calendar)?;
        Ok(flows)
    }

    /// Scheduled amortization per payment date, in percent of face.
    fn match_amortization(&self, terms: &BondTerms, dates: &[PaymentDate]) -> Vec<Decimal> {
        let mut pct = vec![Decimal::ZERO; dates.len()];

        for rule in terms.amortization() {
            if let Some(i) = dates.iter().position(|p| p.date == rule.date) {
                pct[i] += rule.principal_pct;
                continue;
            }

            let nearest = dates
                .iter()
                .enumerate()
                .filter(|(_, p)| p.date.year() == rule.date.year())
                .map(|(i, p)| (i, (p.date - rule.date).abs()))
                .filter(|&(_, gap)| gap <= self.limits.match_window_days)
                .min_by_key(|&(_, gap)| gap);

            match nearest {
                Some((i, gap)) => {
                    warn!(
                        rule_date = %rule.date,
                        step_date = %dates[i].date,
                        gap_days = gap,
                        "amortization rule matched to a nearby payment date"
                    );
                    pct[i] += rule.principal_pct;
                }
                None => {
                    warn!(
                        rule_date = %rule.date,
                        principal_pct = %rule.principal_pct,
                        "amortization rule matches no payment date, principal deferred to maturity"
                    );
                }
            }
        }

        pct
    }
}

/// Generates a schedule with default limits.
pub fn generate(terms: &BondTerms) -> BondResult<Vec<CashFlow>> {
    CashFlowScheduler::default().generate(terms)
}

fn payment_dates(terms: &BondTerms) -> BondResult<Vec<PaymentDate>> {
    let issue = terms.issue_date();
    let maturity = terms.maturity_date();
    let months = terms.period_months();
    let eom = terms.end_of_month();

    let one_period = add_period(issue, months, eom)?;
    let first = terms.first_coupon_date().unwrap_or(one_period);
    let regular_first = first == one_period;

    if first >= maturity {
        return Ok(vec![PaymentDate {
            date: maturity,
            regular: regular_first && first == maturity,
        }]);
    }

    let mut dates = vec![PaymentDate {
        date: first,
        regular: regular_first,
    }];
    let mut step = 1i32;
    loop {
        let next = add_period(first, step * months, eom)?;
        if next >= maturity {
            dates.push(PaymentDate {
                date: maturity,
                regular: next == maturity,
            });
            return Ok(dates);
        }
        dates.push(PaymentDate {
            date: next,
            regular: true,
        });
        if dates.len() > MAX_PERIODS {
            return Err(BondError::invalid_schedule(format!(
                "more than {MAX_PERIODS} coupon periods before {maturity}"
            )));
        }
        step += 1;
    }
}

/// Forces the schedule to end with zero remaining notional.
///
/// A residual on a maturity-dated last entry is folded into its principal;
/// otherwise a MATURITY flow is appended carrying the residual and the
/// coupon accrued on it since the last payment.
pub(crate) fn repair_residual(
    flows: &mut Vec<CashFlow>,
    terms: &BondTerms,
    calendar: &dyn HolidayCalendar,
) -> BondResult<()> {
    let Some(last) = flows.last().copied() else {
        return Ok(());
    };
    let residual = last.remaining_notional();
    if residual.is_zero() {
        return Ok(());
    }

    let maturity = terms.maturity_date();
    warn!(
        residual = %residual,
        last_date = %last.date(),
        "residual notional after generation, forcing repayment at maturity"
    );

    if last.date() >= maturity {
        let mut folded = CashFlow::new(
            last.date(),
            last.coupon(),
            last.principal() + residual,
            Decimal::ZERO,
            CashFlowKind::Maturity,
        );
        if let Some(start) = last.accrual_start() {
            folded = folded.with_accrual_start(start);
        }
        if let Some(slot) = flows.last_mut() {
            *slot = folded;
        }
    } else {
        let rate = terms.coupon_rate_on(maturity) / Decimal::ONE_HUNDRED;
        let accrued = residual
            * rate
            * terms
                .day_count()
                .year_fraction_with(last.date(), maturity, calendar)?;
        flows.push(
            CashFlow::new(maturity, accrued, residual, Decimal::ZERO, CashFlowKind::Maturity)
                .with_accrual_start(last.date()),
        );
    }

    Ok(())
}
