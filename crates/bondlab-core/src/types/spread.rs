//! Spread values reported against a benchmark curve.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of spreads the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpreadType {
    /// Bond yield minus the interpolated benchmark yield at average life.
    Nominal,
    /// Zero-volatility spread added to every benchmark point.
    ZSpread,
}

impl fmt::Display for SpreadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpreadType::Nominal => "Nominal",
            SpreadType::ZSpread => "Z-Spread",
        };
        write!(f, "{name}")
    }
}

/// A spread value in basis points.
///
/// # Example
///
/// ```rust
/// use bondlab_core::types::{Spread, SpreadType};
/// use rust_decimal_macros::dec;
///
/// let spread = Spread::new(dec!(125), SpreadType::ZSpread);
/// assert_eq!(spread.as_bps(), dec!(125));
/// assert_eq!(spread.as_decimal(), dec!(0.0125));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    value_bps: Decimal,
    spread_type: SpreadType,
}

impl Spread {
    /// Creates a new spread from basis points.
    #[must_use]
    pub fn new(bps: Decimal, spread_type: SpreadType) -> Self {
        Self {
            value_bps: bps,
            spread_type,
        }
    }

    /// Creates a spread from a decimal rate difference (0.0125 = 125 bps).
    #[must_use]
    pub fn from_decimal(decimal: Decimal, spread_type: SpreadType) -> Self {
        Self::new(decimal * Decimal::from(10_000), spread_type)
    }

    /// Returns the spread in basis points.
    #[must_use]
    pub fn as_bps(&self) -> Decimal {
        self.value_bps
    }

    /// Returns the spread as a decimal (125 bps = 0.0125).
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.value_bps / Decimal::from(10_000)
    }

    /// Returns the spread type.
    #[must_use]
    pub fn spread_type(&self) -> SpreadType {
        self.spread_type
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} bps ({})", self.value_bps, self.spread_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_conversion() {
        let spread = Spread::from_decimal(dec!(-0.0035), SpreadType::Nominal);
        assert_eq!(spread.as_bps(), dec!(-35));
        assert_eq!(spread.to_string(), "-35.00 bps (Nominal)");
    }
}
