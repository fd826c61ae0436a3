//! Yield-to-maturity through an ordered fallback chain of root finders.

use bondlab_config::{AnalyticsConfig, YieldBounds};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::precision;
use bondlab_core::types::{CashFlow, Date, Frequency};
use bondlab_core::CoreResult;
use bondlab_math::solvers::{RootProblem, SolverAlgorithm, SolverConfig};
use bondlab_math::{MathError, MathResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult, SolverAttempt};
use crate::pricing::TimedCashFlows;

/// Starting yield when the analytic estimate cannot be formed.
const FALLBACK_GUESS: Decimal = dec!(0.05);

/// Price error of `PV(y)` against a target dirty amount, per 100 of target.
struct YieldProblem<'a> {
    flows: &'a TimedCashFlows,
    target: Decimal,
    scale: Decimal,
}

impl<'a> YieldProblem<'a> {
    fn new(flows: &'a TimedCashFlows, target: Decimal) -> CoreResult<Self> {
        Ok(Self {
            flows,
            target,
            scale: precision::div(Decimal::ONE_HUNDRED, target)?,
        })
    }
}

impl RootProblem for YieldProblem<'_> {
    fn value(&self, y: Decimal) -> MathResult<Decimal> {
        let pv = self.flows.present_value(y)?;
        Ok(precision::mul(pv - self.target, self.scale)?)
    }

    fn derivative(&self, y: Decimal) -> MathResult<Decimal> {
        Ok(precision::mul(self.flows.pv_derivative(y)?, self.scale)?)
    }
}

/// Annualized-return estimate of the yield, converted to the compounding
/// frequency of the flows.
///
/// With `C` the undiscounted future cash and `T` its cash-weighted average
/// time, `(C / P)^(1/T) - 1` is the effective annual return;
/// `f × ((1 + r)^(1/f) - 1)` re-expresses it per period.
fn initial_guess(flows: &TimedCashFlows, target: Decimal) -> Decimal {
    let estimate = || -> CoreResult<Decimal> {
        let horizon = flows.weighted_average_time()?;
        if horizon <= Decimal::ZERO {
            return Ok(FALLBACK_GUESS);
        }
        let growth = precision::div(flows.total_amount(), target)?;
        let annual = precision::pow(growth, precision::div(Decimal::ONE, horizon)?)?;
        let f = flows.periods_per_year();
        let periodic = precision::pow(annual, precision::div(Decimal::ONE, f)?)?;
        precision::mul(f, periodic - Decimal::ONE)
    };
    estimate().unwrap_or(FALLBACK_GUESS)
}

/// A solved yield and how it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldSolution {
    /// Yield as a decimal rate, compounded at the bond's frequency.
    pub rate: Decimal,
    /// Algorithm whose result was accepted.
    pub algorithm: SolverAlgorithm,
    /// Iterations that algorithm used.
    pub iterations: u32,
    /// Absolute price error per 100 of target price.
    pub price_error: Decimal,
    /// Every algorithm tried, in order, the accepted one last.
    pub attempts: Vec<SolverAttempt>,
}

/// Yield solver running an ordered chain of root-finding strategies.
///
/// The default chain is Newton-Raphson, then the bracketed secant/bisection
/// hybrid, then fixed-budget bisection. A strategy's result is accepted
/// when its price error is within the acceptance tolerance; otherwise the
/// next strategy runs. When all fail the error carries the full trail.
///
/// # Example
///
/// ```rust
/// use bondlab_analytics::yields::YieldSolver;
/// use bondlab_analytics::pricing::TimedCashFlows;
/// use bondlab_core::daycounts::DayCountConvention;
/// use bondlab_core::types::{CashFlow, CashFlowKind, Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let flows = [CashFlow::new(
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     dec!(0),
///     dec!(100),
///     dec!(0),
///     CashFlowKind::Maturity,
/// )];
/// let timed = TimedCashFlows::new(
///     &flows,
///     Date::from_ymd(2025, 1, 15).unwrap(),
///     Frequency::Annual,
///     DayCountConvention::Thirty360,
/// ).unwrap();
///
/// let solution = YieldSolver::default().solve(&timed, dec!(95)).unwrap();
/// assert!((solution.rate - dec!(0.0526315789)).abs() < dec!(0.000001));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct YieldSolver {
    config: SolverConfig,
    chain: Vec<SolverAlgorithm>,
    acceptance_tolerance: Decimal,
    bounds: YieldBounds,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl YieldSolver {
    /// Builds a solver from the engine configuration.
    #[must_use]
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            config: config.solver_config(),
            chain: config.solver.chain.clone(),
            acceptance_tolerance: config.solver.acceptance_tolerance,
            bounds: config.yield_bounds,
        }
    }

    /// Replaces the fallback chain.
    #[must_use]
    pub fn with_chain(mut self, chain: Vec<SolverAlgorithm>) -> Self {
        self.chain = chain;
        self
    }

    /// Replaces the realistic-yield window.
    #[must_use]
    pub fn with_bounds(mut self, bounds: YieldBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Root-finder settings.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Realistic-yield window.
    #[must_use]
    pub fn bounds(&self) -> &YieldBounds {
        &self.bounds
    }

    /// Rejects a yield outside the realistic window.
    pub fn check_bounds(&self, yield_rate: Decimal) -> AnalyticsResult<()> {
        if self.bounds.contains(yield_rate) {
            Ok(())
        } else {
            Err(AnalyticsError::UnrealisticYield {
                value: yield_rate,
                min: self.bounds.min,
                max: self.bounds.max,
            })
        }
    }

    /// Dirty amount at a supplied yield: one discounting pass, no search.
    pub fn price_at(&self, flows: &TimedCashFlows, yield_rate: Decimal) -> AnalyticsResult<Decimal> {
        self.check_bounds(yield_rate)?;
        Ok(flows.present_value(yield_rate)?)
    }

    /// Solves for the yield equating present value to `target_dirty`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a non-positive target
    /// - `YtmDidNotConverge` with the attempt trail when no strategy reaches
    ///   the acceptance tolerance
    /// - `UnrealisticYield` when the accepted yield lies outside the window
    pub fn solve(&self, flows: &TimedCashFlows, target_dirty: Decimal) -> AnalyticsResult<YieldSolution> {
        if target_dirty <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_input(format!(
                "target price must be positive, got {target_dirty}"
            )));
        }

        let problem = YieldProblem::new(flows, target_dirty)?;
        let guess = self.config.clamp(initial_guess(flows, target_dirty));
        let mut attempts = Vec::with_capacity(self.chain.len());

        for &algorithm in &self.chain {
            let Some(strategy) = algorithm.solver() else {
                continue;
            };

            match strategy.solve(&problem, guess, &self.config) {
                Ok(result) => {
                    let price_error = result.residual.abs();
                    if price_error <= self.acceptance_tolerance {
                        debug!(
                            %algorithm,
                            iterations = result.iterations,
                            error = %price_error,
                            rate = %result.root,
                            "yield solved"
                        );
                        attempts.push(SolverAttempt {
                            algorithm,
                            iterations: result.iterations,
                            price_error: Some(price_error),
                            failure: None,
                        });
                        self.check_bounds(result.root)?;
                        return Ok(YieldSolution {
                            rate: result.root,
                            algorithm,
                            iterations: result.iterations,
                            price_error,
                            attempts,
                        });
                    }

                    debug!(
                        %algorithm,
                        iterations = result.iterations,
                        error = %price_error,
                        "yield attempt above acceptance tolerance, falling back"
                    );
                    attempts.push(SolverAttempt {
                        algorithm,
                        iterations: result.iterations,
                        price_error: Some(price_error),
                        failure: Some(format!(
                            "price error above acceptance tolerance {}",
                            self.acceptance_tolerance
                        )),
                    });
                }
                Err(err) => {
                    debug!(%algorithm, error = %err, "yield attempt failed, falling back");
                    let (iterations, price_error) = match &err {
                        MathError::ConvergenceFailed { iterations, residual } => {
                            (*iterations, Some(residual.abs()))
                        }
                        _ => (0, None),
                    };
                    attempts.push(SolverAttempt {
                        algorithm,
                        iterations,
                        price_error,
                        failure: Some(err.to_string()),
                    });
                }
            }
        }

        Err(AnalyticsError::YtmDidNotConverge { attempts })
    }
}

/// Solves the yield of a schedule at a target dirty amount with default
/// settings.
pub fn solve_yield(
    cash_flows: &[CashFlow],
    settlement: Date,
    target_dirty: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
) -> AnalyticsResult<YieldSolution> {
    let flows = TimedCashFlows::new(cash_flows, settlement, frequency, day_count)?;
    YieldSolver::default().solve(&flows, target_dirty)
}
