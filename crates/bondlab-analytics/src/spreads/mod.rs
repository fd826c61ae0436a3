//! Spreads over a benchmark curve.
//!
//! - **Nominal**: bond yield minus the interpolated benchmark yield at the
//!   bond's average life
//! - **Z-spread**: constant add-on to every benchmark rate reconciling the
//!   discounted flows with the dirty price

mod nominal;
mod zspread;

pub use nominal::nominal_spread;
pub use zspread::{ZSpreadOutcome, ZSpreadSolver};

use bondlab_core::types::Spread;
use rust_decimal::Decimal;
use serde::Serialize;

/// Spread analytics against one benchmark curve snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadMetrics {
    /// Nominal spread.
    pub nominal: Spread,
    /// Benchmark yield (percent) at the bond's average life.
    pub benchmark_yield_pct: Decimal,
    /// Z-spread search outcome.
    pub z_spread: ZSpreadOutcome,
}

#[cfg(test)]
pub(crate) mod tests {
    use bondlab_curves::{BenchmarkCurve, CurvePoint};
    use rust_decimal_macros::dec;

    pub(crate) fn sample_curve() -> BenchmarkCurve {
        BenchmarkCurve::new(vec![
            CurvePoint::new(dec!(0.0833), dec!(5.30)),
            CurvePoint::new(dec!(0.25), dec!(5.25)),
            CurvePoint::new(dec!(0.5), dec!(5.10)),
            CurvePoint::new(dec!(1), dec!(4.80)),
            CurvePoint::new(dec!(2), dec!(4.40)),
            CurvePoint::new(dec!(5), dec!(4.10)),
            CurvePoint::new(dec!(10), dec!(4.20)),
            CurvePoint::new(dec!(30), dec!(4.45)),
        ])
        .unwrap()
    }
}
