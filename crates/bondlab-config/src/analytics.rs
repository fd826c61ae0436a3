//! Analytics engine configuration.
//!
//! Every field has a serde default, so an empty file (or `{}`) yields the
//! stock configuration and partial files override only what they name.

use bondlab_bonds::ScheduleLimits;
use bondlab_curves::CurveLimits;
use bondlab_math::solvers::{SolverAlgorithm, SolverConfig, DEFAULT_PROBES};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

// =============================================================================
// ANALYTICS CONFIGURATION
// =============================================================================

/// Configuration for bond analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Yield solver settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Sanity window for solved and supplied yields.
    #[serde(default)]
    pub yield_bounds: YieldBounds,

    /// Cash-flow schedule settings.
    #[serde(default)]
    pub schedule: ScheduleSettings,

    /// Benchmark curve settings.
    #[serde(default)]
    pub curve: CurveSettings,

    /// Z-spread solver settings.
    #[serde(default)]
    pub spread: SpreadSettings,

    /// Risk metric settings.
    #[serde(default)]
    pub risk: RiskSettings,
}

impl AnalyticsConfig {
    /// Root-finder configuration for the yield solver.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            tolerance: self.solver.tolerance,
            max_iterations: self.solver.max_iterations,
            lower_bound: self.solver.lower_bound,
            upper_bound: self.solver.upper_bound,
            derivative_floor: self.solver.derivative_floor,
            bisection_iterations: self.solver.bisection_iterations,
            probes: self.solver.probe_yields.clone(),
        }
    }

    /// Amortization limits for schedule generation and validation.
    #[must_use]
    pub fn schedule_limits(&self) -> ScheduleLimits {
        ScheduleLimits {
            amortization_warn_pct: self.schedule.amortization_warn_pct,
            amortization_max_pct: self.schedule.amortization_max_pct,
            match_window_days: self.schedule.match_window_days,
        }
    }

    /// Sanity limits for benchmark curves.
    #[must_use]
    pub fn curve_limits(&self) -> CurveLimits {
        CurveLimits {
            min_points: self.curve.min_points,
            max_inversion_pct: self.curve.max_inversion_pct,
        }
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.solver.validate();
        errors.extend(self.yield_bounds.validate());
        errors.extend(self.schedule.validate());
        errors.extend(self.curve.validate());
        errors.extend(self.spread.validate());
        errors.extend(self.risk.validate());
        errors
    }
}

// =============================================================================
// SOLVER
// =============================================================================

/// Yield solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Convergence tolerance on price error, per 100 of target price.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,

    /// Iteration cap for Newton and secant steps.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Largest price error, per 100 of target price, at which a
    /// non-converged result is still accepted.
    #[serde(default = "default_acceptance_tolerance")]
    pub acceptance_tolerance: Decimal,

    /// Lowest yield the solver searches.
    #[serde(default = "default_lower_bound")]
    pub lower_bound: Decimal,

    /// Highest yield the solver searches.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: Decimal,

    /// Newton gives up below this price derivative.
    #[serde(default = "default_derivative_floor")]
    pub derivative_floor: Decimal,

    /// Iteration budget of the last-resort bisection.
    #[serde(default = "default_bisection_iterations")]
    pub bisection_iterations: u32,

    /// Yields probed when bracketing a root.
    #[serde(default = "default_probe_yields")]
    pub probe_yields: Vec<Decimal>,

    /// Algorithms tried in order.
    #[serde(default = "default_chain")]
    pub chain: Vec<SolverAlgorithm>,
}

fn default_tolerance() -> Decimal {
    dec!(0.000000001)
}

fn default_max_iterations() -> u32 {
    100
}

fn default_acceptance_tolerance() -> Decimal {
    dec!(0.000001)
}

fn default_lower_bound() -> Decimal {
    dec!(-0.99)
}

fn default_upper_bound() -> Decimal {
    dec!(5.0)
}

fn default_derivative_floor() -> Decimal {
    dec!(0.0000000001)
}

fn default_bisection_iterations() -> u32 {
    200
}

fn default_probe_yields() -> Vec<Decimal> {
    DEFAULT_PROBES.to_vec()
}

fn default_chain() -> Vec<SolverAlgorithm> {
    vec![
        SolverAlgorithm::NewtonRaphson,
        SolverAlgorithm::SecantBisection,
        SolverAlgorithm::Bisection,
    ]
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            acceptance_tolerance: default_acceptance_tolerance(),
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            derivative_floor: default_derivative_floor(),
            bisection_iterations: default_bisection_iterations(),
            probe_yields: default_probe_yields(),
            chain: default_chain(),
        }
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.tolerance <= Decimal::ZERO || self.tolerance > dec!(0.0001) {
            errors.push(ValidationError::new(
                "solver.tolerance",
                "must be in (0, 1e-4]",
            ));
        }
        if self.acceptance_tolerance < self.tolerance {
            errors.push(ValidationError::new(
                "solver.acceptance_tolerance",
                "must not be tighter than solver.tolerance",
            ));
        }
        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            errors.push(ValidationError::new(
                "solver.max_iterations",
                format!("{} outside 1..=10000", self.max_iterations),
            ));
        }
        if self.bisection_iterations == 0 || self.bisection_iterations > 10_000 {
            errors.push(ValidationError::new(
                "solver.bisection_iterations",
                format!("{} outside 1..=10000", self.bisection_iterations),
            ));
        }
        if self.lower_bound <= dec!(-1) || self.lower_bound >= self.upper_bound {
            errors.push(ValidationError::new(
                "solver.lower_bound",
                "must exceed -1 and be below solver.upper_bound",
            ));
        }
        if self.derivative_floor <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "solver.derivative_floor",
                "must be positive",
            ));
        }
        if self.probe_yields.len() < 2 {
            errors.push(ValidationError::new(
                "solver.probe_yields",
                "at least two probes are needed to bracket a root",
            ));
        }
        if self
            .probe_yields
            .iter()
            .any(|p| *p < self.lower_bound || *p > self.upper_bound)
        {
            errors.push(ValidationError::new(
                "solver.probe_yields",
                "probes must lie within the solver bounds",
            ));
        }
        if self.chain.is_empty() {
            errors.push(ValidationError::new("solver.chain", "cannot be empty"));
        }
        if self.chain.contains(&SolverAlgorithm::Direct) {
            errors.push(ValidationError::new(
                "solver.chain",
                "Direct is not an iterative algorithm",
            ));
        }

        errors
    }
}

// =============================================================================
// YIELD BOUNDS
// =============================================================================

/// Sanity window outside which a yield is reported as unrealistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldBounds {
    /// Lowest realistic yield as a decimal rate.
    #[serde(default = "default_min_yield")]
    pub min: Decimal,

    /// Highest realistic yield as a decimal rate.
    #[serde(default = "default_max_yield")]
    pub max: Decimal,
}

fn default_min_yield() -> Decimal {
    dec!(-0.10)
}

fn default_max_yield() -> Decimal {
    dec!(0.50)
}

impl Default for YieldBounds {
    fn default() -> Self {
        Self {
            min: default_min_yield(),
            max: default_max_yield(),
        }
    }
}

impl YieldBounds {
    /// Returns true if `y` lies within the window.
    #[must_use]
    pub fn contains(&self, y: Decimal) -> bool {
        y >= self.min && y <= self.max
    }
}

impl Validate for YieldBounds {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.min >= self.max {
            errors.push(ValidationError::new(
                "yield_bounds.min",
                "must be below yield_bounds.max",
            ));
        }
        errors
    }
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// Cash-flow schedule settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Total amortization, in percent of face, that triggers a warning.
    #[serde(default = "default_warn_pct")]
    pub amortization_warn_pct: Decimal,

    /// Total amortization, in percent of face, above which terms are rejected.
    #[serde(default = "default_max_pct")]
    pub amortization_max_pct: Decimal,

    /// Days within which a rule date may match a nearby payment date.
    #[serde(default = "default_match_window")]
    pub match_window_days: i64,

    /// End-of-month rule for bonds that do not specify one.
    #[serde(default = "default_eom")]
    pub end_of_month: bool,
}

fn default_warn_pct() -> Decimal {
    dec!(90)
}

fn default_max_pct() -> Decimal {
    dec!(100.01)
}

fn default_match_window() -> i64 {
    180
}

fn default_eom() -> bool {
    true
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            amortization_warn_pct: default_warn_pct(),
            amortization_max_pct: default_max_pct(),
            match_window_days: default_match_window(),
            end_of_month: default_eom(),
        }
    }
}

impl Validate for ScheduleSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.amortization_max_pct < dec!(100) {
            errors.push(ValidationError::new(
                "schedule.amortization_max_pct",
                "must allow full repayment (>= 100)",
            ));
        }
        if self.amortization_warn_pct <= Decimal::ZERO
            || self.amortization_warn_pct > self.amortization_max_pct
        {
            errors.push(ValidationError::new(
                "schedule.amortization_warn_pct",
                "must be positive and not above schedule.amortization_max_pct",
            ));
        }
        if !(0..=366).contains(&self.match_window_days) {
            errors.push(ValidationError::new(
                "schedule.match_window_days",
                format!("{} outside 0..=366", self.match_window_days),
            ));
        }
        errors
    }
}

// =============================================================================
// CURVE, SPREAD AND RISK
// =============================================================================

/// Benchmark curve settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    /// Minimum number of curve points.
    #[serde(default = "default_min_points")]
    pub min_points: usize,

    /// Largest allowed yield drop between adjacent maturities, in points.
    #[serde(default = "default_max_inversion")]
    pub max_inversion_pct: Decimal,
}

fn default_min_points() -> usize {
    8
}

fn default_max_inversion() -> Decimal {
    dec!(1.50)
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            min_points: default_min_points(),
            max_inversion_pct: default_max_inversion(),
        }
    }
}

impl Validate for CurveSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.min_points < 2 {
            errors.push(ValidationError::new(
                "curve.min_points",
                "interpolation needs at least 2 points",
            ));
        }
        if self.max_inversion_pct < Decimal::ZERO {
            errors.push(ValidationError::new(
                "curve.max_inversion_pct",
                "cannot be negative",
            ));
        }
        errors
    }
}

/// Z-spread solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadSettings {
    /// Lowest spread searched, as a decimal rate.
    #[serde(default = "default_spread_lower")]
    pub lower: Decimal,

    /// Highest spread searched, as a decimal rate.
    #[serde(default = "default_spread_upper")]
    pub upper: Decimal,

    /// Price error, in currency units, at which the search stops.
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: Decimal,

    /// Bisection iteration budget.
    #[serde(default = "default_spread_iterations")]
    pub max_iterations: u32,
}

fn default_spread_lower() -> Decimal {
    dec!(-0.01)
}

fn default_spread_upper() -> Decimal {
    dec!(0.05)
}

fn default_price_tolerance() -> Decimal {
    dec!(0.01)
}

fn default_spread_iterations() -> u32 {
    50
}

impl Default for SpreadSettings {
    fn default() -> Self {
        Self {
            lower: default_spread_lower(),
            upper: default_spread_upper(),
            price_tolerance: default_price_tolerance(),
            max_iterations: default_spread_iterations(),
        }
    }
}

impl Validate for SpreadSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.lower >= self.upper {
            errors.push(ValidationError::new(
                "spread.lower",
                "must be below spread.upper",
            ));
        }
        if self.price_tolerance <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "spread.price_tolerance",
                "must be positive",
            ));
        }
        if self.max_iterations == 0 {
            errors.push(ValidationError::new(
                "spread.max_iterations",
                "must be positive",
            ));
        }
        errors
    }
}

/// Risk metric settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSettings {
    /// Yield shock in basis points for effective duration.
    #[serde(default = "default_shock_bps")]
    pub shock_bps: Decimal,
}

fn default_shock_bps() -> Decimal {
    Decimal::ONE
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            shock_bps: default_shock_bps(),
        }
    }
}

impl Validate for RiskSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.shock_bps <= Decimal::ZERO || self.shock_bps > dec!(100) {
            errors.push(ValidationError::new(
                "risk.shock_bps",
                "must be in (0, 100]",
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.solver.chain.len(), 3);
        assert_eq!(config.yield_bounds.max, dec!(0.50));
    }

    #[test]
    fn test_solver_config_conversion() {
        let config = AnalyticsConfig::default();
        let solver = config.solver_config();

        assert_eq!(solver.tolerance, dec!(0.000000001));
        assert_eq!(solver.lower_bound, dec!(-0.99));
        assert_eq!(solver.probes.len(), DEFAULT_PROBES.len());
    }

    #[test]
    fn test_limit_conversions() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.schedule_limits(), ScheduleLimits::default());
        assert_eq!(config.curve_limits(), CurveLimits::default());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AnalyticsConfig::default();
        config.solver.chain.clear();
        config.yield_bounds.min = dec!(0.6);
        config.spread.price_tolerance = Decimal::ZERO;

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            config.validate_or_error(),
            Err(crate::ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_single_error() {
        let mut config = AnalyticsConfig::default();
        config.risk.shock_bps = Decimal::ZERO;

        let err = config.validate_or_error().unwrap_err();
        assert_eq!(
            err,
            crate::ConfigError::Validation {
                field: "risk.shock_bps".into(),
                message: "must be in (0, 100]".into(),
            }
        );
    }

    #[test]
    fn test_yield_bounds_contains() {
        let bounds = YieldBounds::default();
        assert!(bounds.contains(dec!(0.05)));
        assert!(bounds.contains(dec!(-0.10)));
        assert!(!bounds.contains(dec!(0.51)));
    }
}
