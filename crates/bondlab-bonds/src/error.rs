//! Error types for bond terms and schedules.

use bondlab_core::CoreError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building terms or generating schedules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Structural validation of the bond terms failed.
    #[error("Invalid bond terms: {}", errors.join("; "))]
    InvalidTerms {
        /// Every structural problem found.
        errors: Vec<String>,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Non-positive face or amortization, amortization overflow,
    /// out-of-range rule dates, or a malformed persisted schedule.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },

    /// Terms could not be decoded from their serialized form.
    #[error("Cannot decode bond terms: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// Date or arithmetic failure from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(errors: Vec<String>) -> Self {
        Self::InvalidTerms { errors }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }
}
