//! Error types for the core layer.
//!
//! Dates, day counts, and the decimal precision helpers all report failures
//! through [`CoreError`]. Higher layers wrap it, keeping the arithmetic
//! variants (`DivisionByZero`, `NegativeRadicand`) distinguishable.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date construction or date arithmetic.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Day count calculation error.
    #[error("Day count error: {reason}")]
    DayCount {
        /// Description of the error.
        reason: String,
    },

    /// Division by a zero denominator.
    #[error("Division by zero: {context}")]
    DivisionByZero {
        /// The operation that divided by zero.
        context: String,
    },

    /// Root or fractional power of a negative number.
    #[error("Negative radicand in {context}: {value}")]
    NegativeRadicand {
        /// The operation that received the negative base.
        context: String,
        /// The offending value, formatted.
        value: String,
    },

    /// Arithmetic result exceeded the decimal range.
    #[error("Arithmetic overflow in {context}")]
    Overflow {
        /// The overflowing operation.
        context: String,
    },

    /// Unparseable enumeration value (day count, frequency, currency).
    #[error("Cannot parse {kind}: '{value}'")]
    Parse {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a day count error.
    #[must_use]
    pub fn day_count(reason: impl Into<String>) -> Self {
        Self::DayCount {
            reason: reason.into(),
        }
    }

    /// Creates a division-by-zero error.
    #[must_use]
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Creates a negative radicand error.
    #[must_use]
    pub fn negative_radicand(context: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::NegativeRadicand {
            context: context.into(),
            value: value.to_string(),
        }
    }

    /// Creates an overflow error.
    #[must_use]
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_radicand_display() {
        let err = CoreError::negative_radicand("pow", -4);
        assert_eq!(err.to_string(), "Negative radicand in pow: -4");
    }
}
