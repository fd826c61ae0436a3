//! Error types for benchmark curves.

use bondlab_math::MathError;
use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction and retrieval.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough points to form a benchmark curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// A maturity that is zero or negative.
    #[error("Maturity must be positive, got {maturity}")]
    InvalidMaturity {
        /// The offending maturity in years.
        maturity: Decimal,
    },

    /// Two points share a maturity.
    #[error("Duplicate maturity {maturity}")]
    DuplicateMaturity {
        /// The repeated maturity in years.
        maturity: Decimal,
    },

    /// Yield falls between adjacent maturities by more than the tolerance.
    #[error("Curve inverts by {drop} points between {short}y and {long}y (limit {limit})")]
    ExcessiveInversion {
        /// Shorter maturity.
        short: Decimal,
        /// Longer maturity.
        long: Decimal,
        /// Yield drop in percentage points.
        drop: Decimal,
        /// Allowed drop.
        limit: Decimal,
    },

    /// The provider could not supply a curve.
    #[error("Curve unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// Interpolator construction failed.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
