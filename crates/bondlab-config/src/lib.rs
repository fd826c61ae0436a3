//! # Bondlab Config
//!
//! Configuration for the Bondlab analytics engine: solver tolerances and
//! fallback chain, yield sanity bounds, amortization limits, curve sanity
//! limits, Z-spread search range and risk shocks.
//!
//! Configurations load from TOML or JSON and are validated through the
//! [`Validate`] trait, which reports every problem at once.
//!
//! ```rust
//! use bondlab_config::{AnalyticsConfig, Validate};
//!
//! let config = AnalyticsConfig::from_toml_str("[solver]\nmax_iterations = 60\n").unwrap();
//! assert_eq!(config.solver.max_iterations, 60);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod analytics;
pub mod error;
mod loader;

pub use analytics::{
    AnalyticsConfig, CurveSettings, RiskSettings, ScheduleSettings, SolverSettings,
    SpreadSettings, YieldBounds,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
