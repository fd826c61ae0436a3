//! Nominal spread over the benchmark curve.

use bondlab_core::types::{Spread, SpreadType};
use bondlab_curves::BenchmarkCurve;
use rust_decimal::Decimal;

/// Yield minus the benchmark yield at `average_life`.
///
/// Returns the spread and the benchmark yield (percent) it was taken
/// against. Beyond either end of the curve the endpoint yield applies.
#[must_use]
pub fn nominal_spread(
    yield_rate: Decimal,
    average_life: Decimal,
    curve: &BenchmarkCurve,
) -> (Spread, Decimal) {
    let benchmark_pct = curve.yield_at(average_life);
    let spread = Spread::from_decimal(yield_rate - curve.rate_at(average_life), SpreadType::Nominal);
    (spread, benchmark_pct)
}
