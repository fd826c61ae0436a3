//! Error types for numerical routines.

use bondlab_core::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding and interpolation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm ran out of iterations.
    #[error("Convergence failed after {iterations} iterations (residual: {residual})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: Decimal,
    },

    /// Derivative too small to take a Newton step.
    #[error("Derivative underflow: |f'(x)| = {value} below floor")]
    DerivativeUnderflow {
        /// The near-zero derivative.
        value: Decimal,
    },

    /// Function values at both ends of a bracket share a sign.
    #[error("Invalid bracket: f({a}) = {fa} and f({b}) = {fb} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: Decimal,
        /// Upper bound of bracket.
        b: Decimal,
        /// Function value at a.
        fa: Decimal,
        /// Function value at b.
        fb: Decimal,
    },

    /// No adjacent probe pair straddles a root.
    #[error("No sign change found across {probes} probes in [{lower}, {upper}]")]
    NoBracket {
        /// Number of probes evaluated successfully.
        probes: usize,
        /// Smallest probe.
        lower: Decimal,
        /// Largest probe.
        upper: Decimal,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Arithmetic failure inside a function evaluation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: Decimal) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
