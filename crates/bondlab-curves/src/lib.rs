//! # Bondlab Curves
//!
//! Benchmark yield curves for spread analytics.
//!
//! - [`CurvePoint`]: a `(maturity in years, yield in percent)` pair
//! - [`BenchmarkCurve`]: a validated, immutable, maturity-sorted snapshot
//!   with linear interpolation and flat extrapolation
//! - [`BenchmarkCurveProvider`]: the collaborator that supplies snapshots,
//!   with static and CSV-file implementations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod curve;
pub mod error;
pub mod point;
pub mod provider;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{BenchmarkCurve, CurveLimits};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::point::CurvePoint;
    pub use crate::provider::{
        read_curve_csv, BenchmarkCurveProvider, CsvCurveProvider, StaticCurveProvider,
    };
}

pub use curve::{BenchmarkCurve, CurveLimits};
pub use error::{CurveError, CurveResult};
pub use point::CurvePoint;
pub use provider::{BenchmarkCurveProvider, CsvCurveProvider, StaticCurveProvider};
