//! Analytical convexity.

use bondlab_core::precision;
use rust_decimal::Decimal;

use crate::error::AnalyticsResult;
use crate::pricing::TimedCashFlows;

/// Convexity at a flat yield.
///
/// With `n_i = f × t_i` compounding periods to each flow:
///
/// ```text
/// C = Σ CF_i × n_i × (n_i + 1) × DF_i / ((1 + y/f)² × PV × f²)
/// ```
pub fn convexity(flows: &TimedCashFlows, yield_rate: Decimal) -> AnalyticsResult<Decimal> {
    let f = flows.periods_per_year();
    let base = flows.compounding_base(yield_rate)?;
    let dfs = flows.discount_factors(yield_rate)?;

    let mut pv = Decimal::ZERO;
    let mut numerator = Decimal::ZERO;
    for (tf, df) in flows.flows().iter().zip(dfs) {
        let pv_i = precision::mul(tf.amount(), df)?;
        let n = precision::mul(f, tf.years())?;
        pv = precision::add(pv, pv_i)?;
        numerator = precision::add(
            numerator,
            precision::mul(pv_i, precision::mul(n, n + Decimal::ONE)?)?,
        )?;
    }

    let denominator = precision::mul(
        precision::mul(base, base)?,
        precision::mul(pv, precision::mul(f, f)?)?,
    )?;
    Ok(precision::div(numerator, denominator)?)
}
