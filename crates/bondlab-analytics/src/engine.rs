//! The analytics facade.
//!
//! [`AnalyticsEngine`] turns bond terms, a settlement date, a market quote
//! and an optional benchmark curve into one [`BondAnalytics`] bundle. Every
//! call is independent: the engine holds only its configuration and holiday
//! calendar, and reads the curve through a shared borrow for the duration
//! of the call.

use std::fmt;
use std::sync::Arc;

use bondlab_bonds::cashflows::{validate_schedule, PersistedScheduleSource};
use bondlab_bonds::validation::schedule_errors;
use bondlab_bonds::{BondTerms, CashFlowScheduler, ValidationReport};
use bondlab_config::{AnalyticsConfig, Validate};
use bondlab_core::calendars::{HolidayCalendar, WeekendCalendar};
use bondlab_core::precision;
use bondlab_core::types::{CashFlow, Date};
use bondlab_curves::{BenchmarkCurve, BenchmarkCurveProvider};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::TimedCashFlows;
use crate::quote::MarketQuote;
use crate::result::{BondAnalytics, PriceMetrics, SolverDiagnostics, YieldMetrics};
use crate::risk::{accrued_interest_with, RiskMetrics};
use crate::spreads::{nominal_spread, SpreadMetrics, ZSpreadSolver};
use crate::yields::{current_yield, yield_to_worst, YieldSolver};

const BPS: Decimal = dec!(10000);

/// Orchestrates scheduling, yield solving, risk and spreads.
///
/// # Example
///
/// ```rust
/// use bondlab_analytics::{AnalyticsEngine, MarketQuote};
/// use bondlab_bonds::BondTerms;
/// use bondlab_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .face_value(dec!(1000))
///     .coupon_rate(dec!(5))
///     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
///     .maturity_date(Date::from_ymd(2030, 1, 15).unwrap())
///     .build()
///     .unwrap();
///
/// let engine = AnalyticsEngine::default();
/// let settlement = Date::from_ymd(2025, 1, 15).unwrap();
/// let result = engine
///     .analyze(&terms, settlement, &MarketQuote::price(dec!(100)), None)
///     .unwrap();
///
/// assert!((result.yields.ytm - dec!(0.05)).abs() < dec!(0.000001));
/// assert!(result.spreads.is_none());
/// ```
#[derive(Clone)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    calendar: Arc<dyn HolidayCalendar>,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            config: AnalyticsConfig::default(),
            calendar: Arc::new(WeekendCalendar),
        }
    }
}

impl fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("config", &self.config)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl AnalyticsEngine {
    /// Creates an engine after validating its configuration.
    pub fn new(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Replaces the holiday calendar used for BUS/252 day counts and
    /// settlement lags. The default closes weekends only.
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl HolidayCalendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// The holiday calendar.
    #[must_use]
    pub fn calendar(&self) -> &dyn HolidayCalendar {
        self.calendar.as_ref()
    }

    /// Settlement date for a trade on `trade_date`, after the bond's
    /// settlement lag in business days of the engine calendar.
    #[must_use]
    pub fn settlement_date(&self, terms: &BondTerms, trade_date: Date) -> Date {
        terms.settlement_date_with(trade_date, self.calendar())
    }

    /// Structural checks on bond terms, independent of market inputs.
    #[must_use]
    pub fn validate(&self, terms: &BondTerms) -> ValidationReport {
        terms.validate_with(&self.config.schedule_limits())
    }

    /// Generates the cash-flow schedule of valid terms.
    pub fn schedule(&self, terms: &BondTerms) -> AnalyticsResult<Vec<CashFlow>> {
        self.ensure_valid(terms)?;
        Ok(CashFlowScheduler::new(self.config.schedule_limits()).generate_with(terms, self.calendar())?)
    }

    /// Analyzes a bond from its terms.
    ///
    /// # Errors
    ///
    /// Structural problems with the terms, an unusable settlement date or
    /// quote, and solver failures are all raised; no partial result is
    /// returned. A missing curve is not an error: spreads are then absent.
    pub fn analyze(
        &self,
        terms: &BondTerms,
        settlement: Date,
        quote: &MarketQuote,
        curve: Option<&BenchmarkCurve>,
    ) -> AnalyticsResult<BondAnalytics> {
        let cash_flows = self.schedule(terms)?;
        self.analyze_flows(terms, cash_flows, settlement, quote, curve)
    }

    /// Analyzes a bond with the benchmark curve fetched from `provider` as of
    /// settlement.
    ///
    /// # Errors
    ///
    /// `CurveUnavailable` when the provider fails or its points do not form
    /// a usable curve, besides everything [`analyze`](Self::analyze) raises.
    pub fn analyze_with_provider(
        &self,
        terms: &BondTerms,
        settlement: Date,
        quote: &MarketQuote,
        provider: &dyn BenchmarkCurveProvider,
    ) -> AnalyticsResult<BondAnalytics> {
        let points = provider.get_curve(settlement)?;
        let curve = BenchmarkCurve::with_limits(points, &self.config.curve_limits())?
            .with_as_of(settlement);
        self.analyze(terms, settlement, quote, Some(&curve))
    }

    /// Analyzes a bond against a schedule captured elsewhere.
    ///
    /// The schedule must pass [`validate_schedule`] before it is used.
    pub fn analyze_schedule(
        &self,
        terms: &BondTerms,
        cash_flows: Vec<CashFlow>,
        settlement: Date,
        quote: &MarketQuote,
        curve: Option<&BenchmarkCurve>,
    ) -> AnalyticsResult<BondAnalytics> {
        self.ensure_valid(terms)?;
        validate_schedule(&cash_flows)?;
        self.analyze_flows(terms, cash_flows, settlement, quote, curve)
    }

    /// Uses the persisted schedule for the bond when `source` has one, and
    /// generates it otherwise.
    pub fn analyze_from_source(
        &self,
        terms: &BondTerms,
        source: &dyn PersistedScheduleSource,
        settlement: Date,
        quote: &MarketQuote,
        curve: Option<&BenchmarkCurve>,
    ) -> AnalyticsResult<BondAnalytics> {
        let persisted = match terms.id() {
            Some(id) => source.schedule(id)?,
            None => None,
        };
        match persisted {
            Some(cash_flows) => {
                debug!(bond_id = ?terms.id(), "using persisted schedule");
                self.analyze_schedule(terms, cash_flows, settlement, quote, curve)
            }
            None => self.analyze(terms, settlement, quote, curve),
        }
    }

    fn ensure_valid(&self, terms: &BondTerms) -> AnalyticsResult<()> {
        let problems = schedule_errors(terms, &self.config.schedule_limits());
        if !problems.is_empty() {
            return Err(AnalyticsError::InvalidSchedule(problems.join("; ")));
        }
        let report = self.validate(terms);
        if report.valid {
            Ok(())
        } else {
            Err(AnalyticsError::InvalidBondTerms {
                errors: report.errors,
            })
        }
    }

    fn analyze_flows(
        &self,
        terms: &BondTerms,
        cash_flows: Vec<CashFlow>,
        settlement: Date,
        quote: &MarketQuote,
        curve: Option<&BenchmarkCurve>,
    ) -> AnalyticsResult<BondAnalytics> {
        if settlement < terms.issue_date() {
            return Err(AnalyticsError::InvalidSettlement {
                settlement: settlement.to_string(),
                issue: terms.issue_date().to_string(),
            });
        }

        let calendar = self.calendar();
        let timed = TimedCashFlows::with_calendar(
            &cash_flows,
            settlement,
            terms.frequency(),
            terms.day_count(),
            calendar,
        )?;
        let outstanding = match quote.outstanding_notional() {
            Some(notional) => notional,
            None => timed
                .flows()
                .first()
                .map_or(terms.face_value(), |tf| tf.flow().notional_before()),
        };
        if outstanding <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_input(format!(
                "outstanding notional must be positive, got {outstanding}"
            )));
        }

        let accrued = accrued_interest_with(
            &cash_flows,
            settlement,
            terms.day_count(),
            Some(terms.issue_date()),
            calendar,
        )?;
        let solver = YieldSolver::from_config(&self.config);

        let (ytm, dirty_amount, diagnostics) = match *quote {
            MarketQuote::Price { clean_pct, .. } => {
                if clean_pct <= Decimal::ZERO {
                    return Err(AnalyticsError::invalid_input(format!(
                        "price must be positive, got {clean_pct}"
                    )));
                }
                let dirty = clean_pct * outstanding / Decimal::ONE_HUNDRED + accrued;
                let solution = solver.solve(&timed, dirty)?;
                (solution.rate, dirty, SolverDiagnostics::from(solution))
            }
            MarketQuote::Yield { rate, .. } => {
                let dirty = solver.price_at(&timed, rate)?;
                (rate, dirty, SolverDiagnostics::direct())
            }
        };

        let clean_amount = dirty_amount - accrued;
        let to_pct = |amount: Decimal| precision::div(amount * Decimal::ONE_HUNDRED, outstanding);
        let prices = PriceMetrics {
            clean_pct: to_pct(clean_amount)?,
            dirty_pct: to_pct(dirty_amount)?,
            clean_amount,
            dirty_amount,
            accrued_amount: accrued,
            accrued_pct: to_pct(accrued)?,
        };

        let shock = self.config.risk.shock_bps / BPS;
        let risk = RiskMetrics::compute(&timed, ytm, dirty_amount, shock)?;

        let annual_coupon =
            outstanding * terms.coupon_rate_on(settlement) / Decimal::ONE_HUNDRED;
        let current = current_yield(&cash_flows, settlement, clean_amount, annual_coupon)?;
        let worst = yield_to_worst(
            terms,
            &cash_flows,
            settlement,
            dirty_amount,
            ytm,
            &solver,
            calendar,
        )?;

        let spreads = match curve {
            Some(curve) => {
                let (nominal, benchmark_yield_pct) = nominal_spread(ytm, risk.average_life, curve);
                let z_spread = ZSpreadSolver::new(curve)
                    .with_settings(self.config.spread)
                    .solve(&timed, dirty_amount)?;
                Some(SpreadMetrics {
                    nominal,
                    benchmark_yield_pct,
                    z_spread,
                })
            }
            None => None,
        };

        debug!(
            bond_id = ?terms.id(),
            %settlement,
            ytm = %ytm,
            algorithm = %diagnostics.algorithm,
            iterations = diagnostics.iterations,
            "bond analyzed"
        );

        Ok(BondAnalytics {
            bond_id: terms.id().map(str::to_owned),
            settlement,
            outstanding_notional: outstanding,
            yields: YieldMetrics {
                ytm,
                ytw: worst.yield_rate,
                ytw_date: worst.date,
                ytw_kind: worst.kind,
                current_yield: current,
                exercises: worst.exercises,
            },
            prices,
            risk,
            spreads,
            diagnostics,
            cash_flows,
        })
    }
}

/// Analyzes a bond with the default configuration.
pub fn analyze(
    terms: &BondTerms,
    settlement: Date,
    quote: &MarketQuote,
    curve: Option<&BenchmarkCurve>,
) -> AnalyticsResult<BondAnalytics> {
    AnalyticsEngine::default().analyze(terms, settlement, quote, curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlab_bonds::cashflows::InMemoryScheduleSource;
    use bondlab_config::ConfigError;
    use bondlab_curves::StaticCurveProvider;
    use bondlab_math::solvers::SolverAlgorithm;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn vanilla() -> BondTerms {
        BondTerms::builder()
            .id("VANILLA-5Y")
            .face_value(dec!(1000))
            .coupon_rate(dec!(5))
            .issue_date(date("2025-01-15"))
            .maturity_date(date("2030-01-15"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyticsConfig::default();
        config.risk.shock_bps = dec!(0);
        assert!(matches!(
            AnalyticsEngine::new(config),
            Err(AnalyticsError::Config(ConfigError::Validation { .. }))
        ));
    }

    #[test]
    fn test_settlement_before_issue() {
        let err = AnalyticsEngine::default()
            .analyze(&vanilla(), date("2024-12-31"), &MarketQuote::price(dec!(100)), None)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSettlement { .. }));
    }

    #[test]
    fn test_price_and_yield_paths_agree() {
        let engine = AnalyticsEngine::default();
        let settlement = date("2025-04-01");
        let by_price = engine
            .analyze(&vanilla(), settlement, &MarketQuote::price(dec!(98.5)), None)
            .unwrap();
        let by_yield = engine
            .analyze(
                &vanilla(),
                settlement,
                &MarketQuote::yield_rate(by_price.yields.ytm),
                None,
            )
            .unwrap();

        assert_eq!(by_yield.diagnostics.algorithm, SolverAlgorithm::Direct);
        assert_eq!(by_yield.diagnostics.iterations, 0);
        assert!((by_yield.prices.clean_pct - dec!(98.5)).abs() < dec!(0.000001));
        assert_eq!(by_price.prices.accrued_amount, by_yield.prices.accrued_amount);
    }

    #[test]
    fn test_accrued_from_issue_in_first_period() {
        let result = AnalyticsEngine::default()
            .analyze(&vanilla(), date("2025-04-15"), &MarketQuote::price(dec!(100)), None)
            .unwrap();
        // Three months of a 25.00 coupon
        assert_eq!(result.prices.accrued_amount, dec!(12.5));
        assert_eq!(result.prices.accrued_pct, dec!(1.25));
        assert_eq!(result.prices.dirty_amount, dec!(1012.5));
    }

    #[test]
    fn test_provider_failure_is_curve_unavailable() {
        let provider = StaticCurveProvider::new(Vec::new());
        let err = AnalyticsEngine::default()
            .analyze_with_provider(
                &vanilla(),
                date("2025-01-15"),
                &MarketQuote::price(dec!(100)),
                &provider,
            )
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::CurveUnavailable(_)));
    }

    #[test]
    fn test_persisted_schedule_is_validated() {
        let terms = vanilla();
        let mut source = InMemoryScheduleSource::new();
        let mut flows = AnalyticsEngine::default().schedule(&terms).unwrap();
        flows.swap(0, 1);
        source.insert("VANILLA-5Y", flows);

        let err = AnalyticsEngine::default()
            .analyze_from_source(
                &terms,
                &source,
                date("2025-01-15"),
                &MarketQuote::price(dec!(100)),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSchedule(_)));
    }

    #[test]
    fn test_missing_persisted_schedule_falls_back() {
        let result = AnalyticsEngine::default()
            .analyze_from_source(
                &vanilla(),
                &InMemoryScheduleSource::new(),
                date("2025-01-15"),
                &MarketQuote::price(dec!(100)),
                None,
            )
            .unwrap();
        assert_eq!(result.cash_flows.len(), 10);
    }

    #[test]
    fn test_non_positive_price() {
        let err = AnalyticsEngine::default()
            .analyze(&vanilla(), date("2025-01-15"), &MarketQuote::price(dec!(0)), None)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_holiday_calendar_moves_bus252_price() {
        use bondlab_core::calendars::HolidayList;
        use bondlab_core::daycounts::DayCountConvention;

        let terms = BondTerms::builder()
            .face_value(dec!(1000))
            .coupon_rate(dec!(5))
            .issue_date(date("2025-01-15"))
            .maturity_date(date("2030-01-15"))
            .day_count(DayCountConvention::Bus252)
            .build()
            .unwrap();
        let settlement = date("2025-01-15");
        let quote = MarketQuote::yield_rate(dec!(0.05));

        let plain = AnalyticsEngine::default()
            .analyze(&terms, settlement, &quote, None)
            .unwrap();
        let closed = AnalyticsEngine::default()
            .with_calendar(HolidayList::new("Test", [date("2025-03-03")]))
            .analyze(&terms, settlement, &quote, None)
            .unwrap();

        // One closed day shortens every flow's time, so the price rises
        assert!(closed.prices.dirty_amount > plain.prices.dirty_amount);
        assert_eq!(closed.cash_flows, plain.cash_flows);
    }

    #[test]
    fn test_settlement_date_uses_engine_calendar() {
        use bondlab_core::calendars::HolidayList;

        let engine = AnalyticsEngine::default()
            .with_calendar(HolidayList::new("Test", [date("2025-03-17")]));
        // Thursday + 2 business days skips the weekend and the Monday holiday
        assert_eq!(
            engine.settlement_date(&vanilla(), date("2025-03-13")),
            date("2025-03-18")
        );
        assert_eq!(engine.calendar().name(), "Test");
    }

    #[test]
    fn test_negative_amortization_is_invalid_schedule() {
        let terms = BondTerms::builder()
            .face_value(dec!(1000))
            .coupon_rate(dec!(5))
            .issue_date(date("2025-01-15"))
            .maturity_date(date("2030-01-15"))
            .amortization(date("2027-01-15"), dec!(-10))
            .build()
            .unwrap();
        let err = AnalyticsEngine::default().schedule(&terms).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSchedule(_)));
    }
}
