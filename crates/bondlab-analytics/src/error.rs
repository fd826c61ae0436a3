//! Unified error type for the analytics engine.
//!
//! Lower-layer errors convert through `From` impls that keep the
//! precision-layer variants distinguishable: a division by zero deep inside
//! a discount factor still surfaces as [`AnalyticsError::DivisionByZero`].

use bondlab_bonds::BondError;
use bondlab_config::ConfigError;
use bondlab_core::CoreError;
use bondlab_curves::CurveError;
use bondlab_math::solvers::SolverAlgorithm;
use bondlab_math::MathError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// One entry in the yield solver's fallback trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverAttempt {
    /// Algorithm tried.
    pub algorithm: SolverAlgorithm,
    /// Iterations it used.
    pub iterations: u32,
    /// Price error per 100 of target price it reached, when known.
    pub price_error: Option<Decimal>,
    /// Why it was not accepted; `None` for the accepted attempt.
    pub failure: Option<String>,
}

impl SolverAttempt {
    /// Returns true if this attempt produced the accepted yield.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

impl std::fmt::Display for SolverAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} iterations", self.algorithm, self.iterations)?;
        if let Some(err) = self.price_error {
            write!(f, ", error {err}")?;
        }
        write!(f, ")")?;
        if let Some(reason) = &self.failure {
            write!(f, ": {reason}")?;
        }
        Ok(())
    }
}

/// Unified error type for all analytics operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    /// Structural validation of the bond terms failed.
    #[error("invalid bond terms: {}", errors.join("; "))]
    InvalidBondTerms {
        /// Every structural problem found.
        errors: Vec<String>,
    },

    /// The cash-flow schedule cannot be generated or fails its invariants.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Settlement is at or after the final payment.
    #[error("no cash flows after settlement {settlement}")]
    NoFutureCashFlows {
        /// The settlement date.
        settlement: String,
    },

    /// A solved or supplied yield lies outside the sanity window.
    #[error("unrealistic yield {value}: outside [{min}, {max}]")]
    UnrealisticYield {
        /// The yield as a decimal rate.
        value: Decimal,
        /// Window minimum.
        min: Decimal,
        /// Window maximum.
        max: Decimal,
    },

    /// Every algorithm in the fallback chain failed.
    #[error("yield did not converge: {}", attempts.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    YtmDidNotConverge {
        /// What each algorithm did.
        attempts: Vec<SolverAttempt>,
    },

    /// A spread was requested without a usable benchmark curve.
    #[error("benchmark curve unavailable: {0}")]
    CurveUnavailable(String),

    /// Division by zero in the precision layer.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Root or fractional power of a negative number.
    #[error("negative radicand: {0}")]
    NegativeRadicand(String),

    /// Invalid settlement date.
    #[error("invalid settlement date: settlement {settlement} is before issue {issue}")]
    InvalidSettlement {
        /// The settlement date that was provided.
        settlement: String,
        /// The issue date of the instrument.
        issue: String,
    },

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Engine configuration rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other arithmetic or date failure.
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DivisionByZero { context } => AnalyticsError::DivisionByZero(context),
            CoreError::NegativeRadicand { context, value } => {
                AnalyticsError::NegativeRadicand(format!("{context}: {value}"))
            }
            other => AnalyticsError::CalculationFailed(other.to_string()),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Core(core) => core.into(),
            other => AnalyticsError::CalculationFailed(other.to_string()),
        }
    }
}

impl From<BondError> for AnalyticsError {
    fn from(err: BondError) -> Self {
        match err {
            BondError::InvalidTerms { errors } => AnalyticsError::InvalidBondTerms { errors },
            BondError::MissingField { field } => AnalyticsError::InvalidBondTerms {
                errors: vec![format!("missing {field}")],
            },
            BondError::InvalidSchedule { reason } => AnalyticsError::InvalidSchedule(reason),
            BondError::Decode { reason } => AnalyticsError::InvalidInput(reason),
            BondError::Core(core) => core.into(),
        }
    }
}

impl From<CurveError> for AnalyticsError {
    fn from(err: CurveError) -> Self {
        AnalyticsError::CurveUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_precision_variants_survive_conversion() {
        let err: AnalyticsError = MathError::Core(CoreError::division_by_zero("1 / 0")).into();
        assert_eq!(err, AnalyticsError::DivisionByZero("1 / 0".into()));

        let err: AnalyticsError = CoreError::negative_radicand("ln", dec!(-1)).into();
        assert!(matches!(err, AnalyticsError::NegativeRadicand(_)));
    }

    #[test]
    fn test_bond_errors_map_to_taxonomy() {
        let err: AnalyticsError = BondError::invalid_schedule("too much").into();
        assert_eq!(err, AnalyticsError::InvalidSchedule("too much".into()));

        let err: AnalyticsError = BondError::invalid_terms(vec!["a".into()]).into();
        assert!(matches!(err, AnalyticsError::InvalidBondTerms { .. }));
    }

    #[test]
    fn test_trail_in_message() {
        let err = AnalyticsError::YtmDidNotConverge {
            attempts: vec![SolverAttempt {
                algorithm: SolverAlgorithm::NewtonRaphson,
                iterations: 100,
                price_error: Some(dec!(0.5)),
                failure: Some("budget exhausted".into()),
            }],
        };
        let message = err.to_string();
        assert!(message.contains("Newton-Raphson (100 iterations, error 0.5): budget exhausted"));
    }
}
