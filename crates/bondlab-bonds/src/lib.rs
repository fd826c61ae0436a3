//! # Bondlab Bonds
//!
//! Bond terms and cash-flow schedules for the Bondlab analytics engine.
//!
//! This crate provides:
//!
//! - **Terms**: immutable [`BondTerms`] with amortization, step-up and
//!   call/put rules, built through [`BondTermsBuilder`] or converted once
//!   from loosely-typed input at the system boundary
//! - **Validation**: structural checks returning every error and warning
//! - **Cash Flows**: schedule generation with end-of-month stepping,
//!   irregular periods, tolerant amortization matching and a residual
//!   repair pass; invariant checks for persisted schedules
//!
//! ## Example
//!
//! ```rust
//! use bondlab_bonds::prelude::*;
//! use bondlab_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let terms = BondTerms::builder()
//!     .face_value(dec!(1000))
//!     .coupon_rate(dec!(5))
//!     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
//!     .maturity_date(Date::from_ymd(2030, 1, 15).unwrap())
//!     .amortization(Date::from_ymd(2028, 1, 15).unwrap(), dec!(50))
//!     .build()
//!     .unwrap();
//!
//! let flows = CashFlowScheduler::default().generate(&terms).unwrap();
//! assert_eq!(flows.len(), 10);
//! assert!(validate_schedule(&flows).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod cashflows;
pub mod error;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{
        generate, validate_schedule, CashFlowScheduler, InMemoryScheduleSource,
        PersistedScheduleSource,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::types::{
        AmortizationRule, BondTerms, BondTermsBuilder, BondTermsInput, CallEntry,
        CouponChangeRule, PutEntry,
    };
    pub use crate::validation::{ScheduleLimits, ValidationReport};
}

pub use cashflows::CashFlowScheduler;
pub use error::{BondError, BondResult};
pub use types::{BondTerms, BondTermsBuilder, BondTermsInput};
pub use validation::{ScheduleLimits, ValidationReport};
