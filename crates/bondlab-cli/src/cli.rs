//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ScheduleArgs, ValidateArgs};

/// Bondlab - bond yield, risk and spread analytics
#[derive(Parser)]
#[command(name = "bondlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log solver attempts and schedule repairs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a bond (yields, prices, duration, convexity, DV01, spreads)
    Analyze(AnalyzeArgs),

    /// Generate and print the cash-flow schedule
    Schedule(ScheduleArgs),

    /// Validate bond terms without analyzing them
    Validate(ValidateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
