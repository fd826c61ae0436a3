//! Benchmark curve points.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A benchmark yield at one maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity_years: Decimal,
    /// Yield in percent.
    pub yield_pct: Decimal,
}

impl CurvePoint {
    /// Creates a new curve point.
    #[must_use]
    pub fn new(maturity_years: Decimal, yield_pct: Decimal) -> Self {
        Self {
            maturity_years,
            yield_pct,
        }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y @ {}%", self.maturity_years, self.yield_pct)
    }
}
