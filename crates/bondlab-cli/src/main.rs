//! Bondlab CLI - bond analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a bond from a clean price
//! bondlab analyze --terms bond.json --settlement 2025-01-15 --price 99.5
//!
//! # Same bond from a yield, with spreads over a benchmark curve
//! bondlab analyze --terms bond.json --settlement 2025-01-15 --yield 5.1 --curve curve.csv
//!
//! # Print the cash-flow schedule
//! bondlab schedule --terms bond.json
//!
//! # Check the terms without analyzing
//! bondlab validate --terms bond.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` to see solver
//! attempts.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format)?,
        Commands::Schedule(args) => commands::schedule::execute(args, format)?,
        Commands::Validate(args) => commands::validate::execute(args, format)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `--verbose` wins over `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
