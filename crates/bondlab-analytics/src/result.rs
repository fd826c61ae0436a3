//! The analytics bundle returned by the engine.

use bondlab_core::types::{CashFlow, CashFlowKind, Date};
use bondlab_math::solvers::SolverAlgorithm;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::SolverAttempt;
use crate::risk::RiskMetrics;
use crate::spreads::SpreadMetrics;
use crate::yields::{ExerciseYield, YieldSolution};

/// Full analytics for one bond at one settlement date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondAnalytics {
    /// Identifier from the bond terms.
    pub bond_id: Option<String>,
    /// Settlement date.
    pub settlement: Date,
    /// Notional outstanding at settlement that prices refer to.
    pub outstanding_notional: Decimal,
    /// Yield measures.
    pub yields: YieldMetrics,
    /// Price measures.
    pub prices: PriceMetrics,
    /// Risk measures at the yield to maturity.
    pub risk: RiskMetrics,
    /// Spread measures; absent without a benchmark curve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreads: Option<SpreadMetrics>,
    /// How the yield was obtained.
    pub diagnostics: SolverDiagnostics,
    /// The schedule analyzed.
    pub cash_flows: Vec<CashFlow>,
}

/// Yield measures, as decimal rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldMetrics {
    /// Yield to maturity.
    pub ytm: Decimal,
    /// Yield to worst.
    pub ytw: Decimal,
    /// Redemption date of the worst scenario.
    pub ytw_date: Date,
    /// Redemption kind of the worst scenario.
    pub ytw_kind: CashFlowKind,
    /// Current yield.
    pub current_yield: Decimal,
    /// Yield to every call and put after settlement.
    pub exercises: Vec<ExerciseYield>,
}

/// Price measures.
///
/// Percentages are of outstanding notional; amounts are in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceMetrics {
    /// Clean price in percent.
    pub clean_pct: Decimal,
    /// Dirty price in percent.
    pub dirty_pct: Decimal,
    /// Clean amount.
    pub clean_amount: Decimal,
    /// Dirty amount.
    pub dirty_amount: Decimal,
    /// Accrued interest amount.
    pub accrued_amount: Decimal,
    /// Accrued interest in percent.
    pub accrued_pct: Decimal,
}

/// Solver diagnostics for observability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverDiagnostics {
    /// Algorithm that produced the yield.
    pub algorithm: SolverAlgorithm,
    /// Iterations it used.
    pub iterations: u32,
    /// Price error per 100 of target price.
    pub price_error: Decimal,
    /// Every algorithm tried.
    pub attempts: Vec<SolverAttempt>,
}

impl SolverDiagnostics {
    /// Diagnostics of a supplied yield: no search took place.
    #[must_use]
    pub fn direct() -> Self {
        Self {
            algorithm: SolverAlgorithm::Direct,
            iterations: 0,
            price_error: Decimal::ZERO,
            attempts: Vec::new(),
        }
    }
}

impl From<YieldSolution> for SolverDiagnostics {
    fn from(solution: YieldSolution) -> Self {
        Self {
            algorithm: solution.algorithm,
            iterations: solution.iterations,
            price_error: solution.price_error,
            attempts: solution.attempts,
        }
    }
}
