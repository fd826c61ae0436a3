//! CLI error types.

use std::path::PathBuf;

use bondlab_analytics::AnalyticsError;
use bondlab_bonds::BondError;
use bondlab_config::ConfigError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// An input file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    ReadFile {
        /// The file that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Terms failed validation.
    #[error("{count} validation error(s) in {}", path.display())]
    InvalidTerms {
        /// The terms file.
        path: PathBuf,
        /// Number of errors reported.
        count: usize,
    },

    /// Bond terms could not be decoded.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine rejected the request.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
