//! Z-spread (zero-volatility spread) solver.
//!
//! The Z-spread is the constant `s` added to every benchmark rate that
//! reconciles discounted flows with the dirty amount:
//!
//! ```text
//! Dirty = Σ CF_i / (1 + r(t_i) + s)^t_i
//! ```
//!
//! The rate varies per flow, so this is a separate search from the flat
//! yield solver: bisection over a bounded spread range with a price
//! tolerance in currency units.

use bondlab_config::SpreadSettings;
use bondlab_core::precision;
use bondlab_core::CoreResult;
use bondlab_curves::BenchmarkCurve;
use bondlab_math::solvers::bisection;
use bondlab_math::MathResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AnalyticsResult;
use crate::pricing::TimedCashFlows;

const BPS: Decimal = dec!(10000);

/// Outcome of a Z-spread search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZSpreadOutcome {
    /// A spread within the search range reprices the bond.
    Solved {
        /// Spread in basis points.
        bps: Decimal,
        /// Bisection iterations used.
        iterations: u32,
        /// Absolute price error in currency units.
        price_error: Decimal,
    },
    /// The price is not reachable by any spread in the search range.
    NotBracketed {
        /// Lower end of the range in basis points.
        lower_bps: Decimal,
        /// Upper end of the range in basis points.
        upper_bps: Decimal,
    },
}

impl ZSpreadOutcome {
    /// The solved spread in basis points, if any.
    #[must_use]
    pub fn bps(&self) -> Option<Decimal> {
        match self {
            ZSpreadOutcome::Solved { bps, .. } => Some(*bps),
            ZSpreadOutcome::NotBracketed { .. } => None,
        }
    }
}

/// Z-spread solver over a benchmark curve.
#[derive(Debug, Clone)]
pub struct ZSpreadSolver<'a> {
    curve: &'a BenchmarkCurve,
    settings: SpreadSettings,
}

impl<'a> ZSpreadSolver<'a> {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new(curve: &'a BenchmarkCurve) -> Self {
        Self {
            curve,
            settings: SpreadSettings::default(),
        }
    }

    /// Replaces the search settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SpreadSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Dirty amount of the flows at spread `s` (decimal) over the curve.
    pub fn price_with_spread(&self, flows: &TimedCashFlows, s: Decimal) -> CoreResult<Decimal> {
        flows.flows().iter().try_fold(Decimal::ZERO, |pv, tf| {
            let base = Decimal::ONE + self.curve.rate_at(tf.years()) + s;
            let df = precision::discount_factor(base, tf.years())?;
            precision::add(pv, precision::mul(tf.amount(), df)?)
        })
    }

    /// Searches for the spread that reprices the flows at `target_dirty`.
    pub fn solve(
        &self,
        flows: &TimedCashFlows,
        target_dirty: Decimal,
    ) -> AnalyticsResult<ZSpreadOutcome> {
        let (lower, upper) = (self.settings.lower, self.settings.upper);
        let objective =
            |s: Decimal| -> MathResult<Decimal> { Ok(self.price_with_spread(flows, s)? - target_dirty) };

        let f_lower = objective(lower)?;
        let f_upper = objective(upper)?;
        let tolerance = self.settings.price_tolerance;
        let straddles = f_lower.is_sign_negative() != f_upper.is_sign_negative()
            || f_lower.abs() < tolerance
            || f_upper.abs() < tolerance;

        if !straddles {
            warn!(
                lower = %lower,
                upper = %upper,
                price_at_lower = %(f_lower + target_dirty),
                price_at_upper = %(f_upper + target_dirty),
                target = %target_dirty,
                "z-spread range does not bracket the price"
            );
            return Ok(ZSpreadOutcome::NotBracketed {
                lower_bps: lower * BPS,
                upper_bps: upper * BPS,
            });
        }

        let result = bisection(objective, lower, upper, self.settings.max_iterations, tolerance)?;
        debug!(
            spread = %result.root,
            iterations = result.iterations,
            error = %result.residual,
            "z-spread solved"
        );

        Ok(ZSpreadOutcome::Solved {
            bps: result.root * BPS,
            iterations: result.iterations,
            price_error: result.residual.abs(),
        })
    }
}
