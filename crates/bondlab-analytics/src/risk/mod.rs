//! Risk analytics at a solved or supplied yield.
//!
//! - **Accrued interest** from the surrounding payment dates
//! - **Duration**: Macaulay, modified and effective (finite difference)
//! - **Convexity**: analytical, on the same discount factors as PV
//! - **DV01**: currency change per basis point
//! - **Average life**: principal-weighted time to repayment

mod accrued;
mod convexity;
mod duration;

pub use accrued::{accrued_interest, accrued_interest_with};
pub use convexity::convexity;
pub use duration::{
    effective_duration, macaulay_duration, modified_duration, modified_from_macaulay,
};

use bondlab_core::precision;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsResult;
use crate::pricing::TimedCashFlows;

const BASIS_POINT: Decimal = dec!(0.0001);

/// DV01 from modified duration and a dirty amount.
#[must_use]
pub fn dv01(modified_duration: Decimal, dirty_amount: Decimal) -> Decimal {
    modified_duration * dirty_amount * BASIS_POINT
}

/// Principal-weighted average time to repayment, in years.
///
/// Only future flows carrying principal take part; with none, the result
/// is zero.
pub fn average_life(flows: &TimedCashFlows) -> AnalyticsResult<Decimal> {
    let mut principal = Decimal::ZERO;
    let mut weighted = Decimal::ZERO;
    for tf in flows.flows().iter().filter(|tf| tf.flow().has_principal()) {
        principal += tf.flow().principal();
        weighted += tf.flow().principal() * tf.years();
    }
    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(precision::div(weighted, principal)?)
}

/// The full set of risk measures at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay_duration: Decimal,
    /// Modified duration.
    pub modified_duration: Decimal,
    /// Effective duration from a symmetric shock.
    pub effective_duration: Decimal,
    /// Convexity.
    pub convexity: Decimal,
    /// Currency change for a one basis point yield move.
    pub dv01: Decimal,
    /// Principal-weighted average life in years.
    pub average_life: Decimal,
}

impl RiskMetrics {
    /// Computes every measure at `yield_rate`.
    ///
    /// `dirty_amount` scales DV01; `shock` (decimal) drives effective
    /// duration.
    pub fn compute(
        flows: &TimedCashFlows,
        yield_rate: Decimal,
        dirty_amount: Decimal,
        shock: Decimal,
    ) -> AnalyticsResult<Self> {
        let macaulay = macaulay_duration(flows, yield_rate)?;
        let modified = modified_from_macaulay(flows, macaulay, yield_rate)?;
        Ok(Self {
            macaulay_duration: macaulay,
            modified_duration: modified,
            effective_duration: effective_duration(flows, yield_rate, shock)?,
            convexity: convexity(flows, yield_rate)?,
            dv01: dv01(modified, dirty_amount),
            average_life: average_life(flows)?,
        })
    }
}
