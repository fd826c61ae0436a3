//! Bond term types.

mod input;
mod rules;
mod terms;

pub use input::{BondTermsInput, DatedPercentInput};
pub use rules::{rate_on, AmortizationRule, CallEntry, CouponChangeRule, PutEntry};
pub use terms::{BondTerms, BondTermsBuilder, DEFAULT_SETTLEMENT_LAG};
