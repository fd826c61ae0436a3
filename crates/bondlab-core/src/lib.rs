//! # Bondlab Core
//!
//! Foundational building blocks for the Bondlab bond analytics engine:
//!
//! - **Types**: `Date`, `Frequency`, `Currency`, `CashFlow`, `Spread`
//! - **Day Count Conventions**: year-fraction arithmetic and end-of-month aware
//!   period addition
//! - **Calendars**: the holiday collaborator used by business-day conventions
//! - **Precision**: checked decimal arithmetic (division, powers, logarithms)
//!   shared by every iterative solver
//!
//! ## Example
//!
//! ```rust
//! use bondlab_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//! let yf = DayCountConvention::Thirty360.year_fraction(start, end).unwrap();
//! assert_eq!(yf, dec!(0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod precision;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{HolidayCalendar, HolidayList, WeekendCalendar};
    pub use crate::daycounts::{add_period, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::precision;
    pub use crate::types::{
        CashFlow, CashFlowKind, Currency, Date, Frequency, Spread, SpreadType,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CashFlow, CashFlowKind, Currency, Date, Frequency};
