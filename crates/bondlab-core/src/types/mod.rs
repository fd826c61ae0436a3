//! Domain types for bond analytics.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`Frequency`]: Coupon payment frequency
//! - [`Currency`]: ISO currency codes
//! - [`CashFlow`]: One dated schedule entry
//! - [`Spread`]: Spread in basis points

mod cashflow;
mod currency;
mod date;
mod frequency;
mod spread;

pub use cashflow::{CashFlow, CashFlowKind};
pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;
pub use spread::{Spread, SpreadType};
