//! Duration measures.
//!
//! ```text
//! D_mac = Σ t_i × PV_i / Σ PV_i
//! D_mod = D_mac / (1 + y/f)
//! D_eff = (P(y - h) - P(y + h)) / (2 × P(y) × h)
//! ```

use bondlab_core::precision;
use rust_decimal::Decimal;

use crate::error::AnalyticsResult;
use crate::pricing::TimedCashFlows;

/// Macaulay duration in years.
pub fn macaulay_duration(flows: &TimedCashFlows, yield_rate: Decimal) -> AnalyticsResult<Decimal> {
    let dfs = flows.discount_factors(yield_rate)?;
    let mut pv = Decimal::ZERO;
    let mut weighted = Decimal::ZERO;
    for (tf, df) in flows.flows().iter().zip(dfs) {
        let pv_i = precision::mul(tf.amount(), df)?;
        pv = precision::add(pv, pv_i)?;
        weighted = precision::add(weighted, precision::mul(tf.years(), pv_i)?)?;
    }
    Ok(precision::div(weighted, pv)?)
}

/// Modified duration.
pub fn modified_duration(flows: &TimedCashFlows, yield_rate: Decimal) -> AnalyticsResult<Decimal> {
    let macaulay = macaulay_duration(flows, yield_rate)?;
    modified_from_macaulay(flows, macaulay, yield_rate)
}

/// Converts Macaulay to modified duration at the flows' frequency.
pub fn modified_from_macaulay(
    flows: &TimedCashFlows,
    macaulay: Decimal,
    yield_rate: Decimal,
) -> AnalyticsResult<Decimal> {
    Ok(precision::div(macaulay, flows.compounding_base(yield_rate)?)?)
}

/// Effective duration from a symmetric yield shock of `shock` (decimal).
pub fn effective_duration(
    flows: &TimedCashFlows,
    yield_rate: Decimal,
    shock: Decimal,
) -> AnalyticsResult<Decimal> {
    let price = flows.present_value(yield_rate)?;
    let down = flows.present_value(yield_rate - shock)?;
    let up = flows.present_value(yield_rate + shock)?;
    let denominator = precision::mul(Decimal::TWO, precision::mul(price, shock)?)?;
    Ok(precision::div(down - up, denominator)?)
}
