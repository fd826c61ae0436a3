//! # Bondlab Analytics
//!
//! Yield, risk and spread analytics for the Bondlab engine.
//!
//! This crate provides:
//!
//! - **Pricing**: discounting of future flows at a flat yield, clean and
//!   dirty price conversion, duration/convexity price estimates
//! - **Yields**: yield-to-maturity through an ordered fallback chain of root
//!   finders, current yield, yield to every call and put, yield-to-worst
//! - **Risk**: accrued interest, Macaulay/modified/effective duration,
//!   convexity, DV01, average life
//! - **Spreads**: nominal spread and Z-spread over a benchmark curve
//! - **Engine**: [`AnalyticsEngine`], the one call that turns terms, a
//!   settlement date and a quote into a [`BondAnalytics`] bundle
//!
//! ## Architecture
//!
//! `bondlab-analytics` depends on `bondlab-bonds` for terms and schedules and
//! on `bondlab-curves` for benchmark snapshots; neither depends on this
//! crate. All failures surface as one [`AnalyticsError`] taxonomy.
//!
//! ## Example
//!
//! ```rust
//! use bondlab_analytics::prelude::*;
//! use bondlab_bonds::BondTerms;
//! use bondlab_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let terms = BondTerms::builder()
//!     .face_value(dec!(1000))
//!     .coupon_rate(dec!(5))
//!     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
//!     .maturity_date(Date::from_ymd(2030, 1, 15).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let settlement = Date::from_ymd(2026, 1, 15).unwrap();
//! let result = analyze(&terms, settlement, &MarketQuote::price(dec!(97.25)), None).unwrap();
//!
//! assert!(result.yields.ytm > dec!(0.05));
//! assert!(result.risk.modified_duration < dec!(4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]

pub mod engine;
pub mod error;
pub mod pricing;
pub mod quote;
pub mod result;
pub mod risk;
pub mod spreads;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{analyze, AnalyticsEngine};
    pub use crate::error::{AnalyticsError, AnalyticsResult, SolverAttempt};
    pub use crate::pricing::{
        clean_price_from_yield, dirty_price_from_yield, estimate_price_change, present_value,
        TimedCashFlows,
    };
    pub use crate::quote::MarketQuote;
    pub use crate::result::{BondAnalytics, PriceMetrics, SolverDiagnostics, YieldMetrics};
    pub use crate::risk::{accrued_interest, RiskMetrics};
    pub use crate::spreads::{SpreadMetrics, ZSpreadOutcome, ZSpreadSolver};
    pub use crate::yields::{solve_yield, ExerciseYield, YieldSolution, YieldSolver};
}

pub use engine::{analyze, AnalyticsEngine};
pub use error::{AnalyticsError, AnalyticsResult, SolverAttempt};
pub use quote::MarketQuote;
pub use result::BondAnalytics;
