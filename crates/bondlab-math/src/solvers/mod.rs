//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: damped Newton iteration with a derivative floor
//! - [`secant_bisection`]: secant steps kept inside a bracket, bisecting
//!   whenever a secant step would leave it
//! - [`bisection`]: fixed-budget interval halving that always returns its
//!   midpoint together with the achieved residual
//! - [`scan_bracket`]: finds a sign change across a ladder of probe points
//!
//! Each algorithm is also available as a [`RootSolver`] strategy so callers
//! can run an ordered fallback chain over a [`RootProblem`].
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May stall | Derivative |
//! | Secant/Bisection | Fast (superlinear) | Guaranteed in bracket | Bracket |
//! | Bisection | Slow (linear) | Always returns | Bracket |

mod bisection;
mod bracket;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use bracket::{scan_bracket, DEFAULT_PROBES};
pub use hybrid::secant_bisection;
pub use newton::newton_raphson;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MathResult;

/// Default tolerance on the objective value.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.0000000001);

/// Default maximum iterations for iterative algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default iteration budget of the last-resort bisection.
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 200;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Convergence tolerance on `|f(x)|`.
    pub tolerance: Decimal,
    /// Maximum Newton and secant iterations.
    pub max_iterations: u32,
    /// Lowest admissible root.
    pub lower_bound: Decimal,
    /// Highest admissible root.
    pub upper_bound: Decimal,
    /// Newton gives up when `|f'(x)|` falls below this.
    pub derivative_floor: Decimal,
    /// Iteration budget of [`bisection`].
    pub bisection_iterations: u32,
    /// Ascending probe ladder used to bracket a root.
    pub probes: Vec<Decimal>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: dec!(-0.99),
            upper_bound: dec!(5.0),
            derivative_floor: dec!(0.0000000001),
            bisection_iterations: DEFAULT_BISECTION_ITERATIONS,
            probes: DEFAULT_PROBES.to_vec(),
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with the given tolerance and iteration cap.
    #[must_use]
    pub fn new(tolerance: Decimal, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the admissible root interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: Decimal, upper: Decimal) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Replaces the bracketing probe ladder.
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<Decimal>) -> Self {
        self.probes = probes;
        self
    }

    /// Clamps a candidate root to the admissible interval.
    #[must_use]
    pub fn clamp(&self, x: Decimal) -> Decimal {
        x.max(self.lower_bound).min(self.upper_bound)
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: Decimal,
    /// Number of iterations used.
    pub iterations: u32,
    /// Objective value at the root.
    pub residual: Decimal,
}

/// Identifies a root-finding algorithm in diagnostics and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverAlgorithm {
    /// Closed-form evaluation, no iteration.
    Direct,
    /// Damped Newton-Raphson.
    NewtonRaphson,
    /// Bracketed secant with bisection fallback.
    SecantBisection,
    /// Fixed-budget bisection.
    Bisection,
}

impl SolverAlgorithm {
    /// Returns a display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SolverAlgorithm::Direct => "Direct",
            SolverAlgorithm::NewtonRaphson => "Newton-Raphson",
            SolverAlgorithm::SecantBisection => "Secant/Bisection",
            SolverAlgorithm::Bisection => "Bisection",
        }
    }

    /// Builds the strategy for an iterative algorithm.
    ///
    /// `Direct` has no strategy and yields `None`.
    #[must_use]
    pub fn solver(&self) -> Option<Box<dyn RootSolver>> {
        match self {
            SolverAlgorithm::Direct => None,
            SolverAlgorithm::NewtonRaphson => Some(Box::new(NewtonSolver)),
            SolverAlgorithm::SecantBisection => Some(Box::new(SecantBisectionSolver)),
            SolverAlgorithm::Bisection => Some(Box::new(BisectionSolver)),
        }
    }
}

impl fmt::Display for SolverAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An objective function with an analytic derivative.
pub trait RootProblem {
    /// Objective value at `x`.
    fn value(&self, x: Decimal) -> MathResult<Decimal>;

    /// First derivative at `x`.
    fn derivative(&self, x: Decimal) -> MathResult<Decimal>;
}

/// A root-finding strategy.
pub trait RootSolver: Send + Sync {
    /// Which algorithm this strategy runs.
    fn algorithm(&self) -> SolverAlgorithm;

    /// Solves `problem(x) = 0`.
    ///
    /// Derivative-based strategies start from `initial_guess`; bracketing
    /// strategies scan `config.probes` for a bracket first.
    fn solve(
        &self,
        problem: &dyn RootProblem,
        initial_guess: Decimal,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>;
}

/// Damped Newton-Raphson strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl RootSolver for NewtonSolver {
    fn algorithm(&self) -> SolverAlgorithm {
        SolverAlgorithm::NewtonRaphson
    }

    fn solve(
        &self,
        problem: &dyn RootProblem,
        initial_guess: Decimal,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        newton_raphson(
            |x| problem.value(x),
            |x| problem.derivative(x),
            initial_guess,
            config,
        )
    }
}

/// Secant/bisection hybrid strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantBisectionSolver;

impl RootSolver for SecantBisectionSolver {
    fn algorithm(&self) -> SolverAlgorithm {
        SolverAlgorithm::SecantBisection
    }

    fn solve(
        &self,
        problem: &dyn RootProblem,
        _initial_guess: Decimal,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        let f = |x| problem.value(x);
        let (a, b) = scan_bracket(f, &config.probes)?;
        secant_bisection(f, a, b, config)
    }
}

/// Last-resort bisection strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl RootSolver for BisectionSolver {
    fn algorithm(&self) -> SolverAlgorithm {
        SolverAlgorithm::Bisection
    }

    fn solve(
        &self,
        problem: &dyn RootProblem,
        _initial_guess: Decimal,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        let f = |x| problem.value(x);
        let (a, b) = scan_bracket(f, &config.probes)?;
        bisection(f, a, b, config.bisection_iterations, config.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;
    use bondlab_core::precision;

    /// Price of a 5-year annual bond as a function of yield, minus a target.
    struct AnnualBond {
        coupon: Decimal,
        target: Decimal,
    }

    impl RootProblem for AnnualBond {
        fn value(&self, y: Decimal) -> MathResult<Decimal> {
            let base = Decimal::ONE + y;
            let mut pv = Decimal::ZERO;
            for t in 1..=5 {
                let df = precision::powi(base, -t)?;
                pv += self.coupon * df;
            }
            pv += dec!(100) * precision::powi(base, -5)?;
            Ok(pv - self.target)
        }

        fn derivative(&self, y: Decimal) -> MathResult<Decimal> {
            let base = Decimal::ONE + y;
            let mut dpv = Decimal::ZERO;
            for t in 1..=5i64 {
                dpv -= Decimal::from(t) * self.coupon * precision::powi(base, -t - 1)?;
            }
            dpv -= dec!(500) * precision::powi(base, -6)?;
            Ok(dpv)
        }
    }

    #[test]
    fn test_solver_config_builders() {
        let config = SolverConfig::default()
            .with_tolerance(dec!(0.00000001))
            .with_max_iterations(50)
            .with_bounds(dec!(-0.5), dec!(1));

        assert_eq!(config.tolerance, dec!(0.00000001));
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.clamp(dec!(2)), dec!(1));
        assert_eq!(config.clamp(dec!(-0.9)), dec!(-0.5));
    }

    #[test]
    fn test_every_strategy_agrees_on_par_bond() {
        let problem = AnnualBond {
            coupon: dec!(5),
            target: dec!(100),
        };
        let config = SolverConfig::default();

        for algorithm in [
            SolverAlgorithm::NewtonRaphson,
            SolverAlgorithm::SecantBisection,
            SolverAlgorithm::Bisection,
        ] {
            let solver = algorithm.solver().unwrap();
            assert_eq!(solver.algorithm(), algorithm);
            let result = solver.solve(&problem, dec!(0.03), &config).unwrap();
            assert_relative_eq!(
                precision::to_display_f64(result.root),
                0.05,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_discount_bond_yield_exceeds_coupon() {
        let problem = AnnualBond {
            coupon: dec!(5),
            target: dec!(95),
        };
        let result = NewtonSolver
            .solve(&problem, dec!(0.05), &SolverConfig::default())
            .unwrap();
        assert!(result.root > dec!(0.05));
        assert!(result.residual.abs() < DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_direct_has_no_strategy() {
        assert!(SolverAlgorithm::Direct.solver().is_none());
    }

    #[test]
    fn test_bracketing_fails_without_sign_change() {
        // Price never reaches 100000 at any probe yield >= -0.5
        let problem = AnnualBond {
            coupon: dec!(5),
            target: dec!(100000),
        };
        let config = SolverConfig::default().with_probes(vec![dec!(-0.5), dec!(0), dec!(1)]);
        let err = SecantBisectionSolver
            .solve(&problem, dec!(0.05), &config)
            .unwrap_err();
        assert!(matches!(err, MathError::NoBracket { .. }));
    }
}
