//! Schedule command implementation.
//!
//! Prints the generated cash flows of a bond.

use anyhow::Result;
use bondlab_analytics::AnalyticsEngine;
use bondlab_core::types::CashFlow;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::TermsArgs;
use crate::output::{print_header, print_json, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub input: TermsArgs,
}

/// One row of a printed schedule.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CashFlowRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Coupon")]
    pub coupon: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Remaining")]
    pub remaining: String,
}

impl From<&CashFlow> for CashFlowRow {
    fn from(cf: &CashFlow) -> Self {
        Self {
            date: cf.date().to_string(),
            kind: cf.kind().to_string(),
            coupon: cf.coupon().round_dp(6).to_string(),
            principal: cf.principal().round_dp(6).to_string(),
            total: cf.total().round_dp(6).to_string(),
            remaining: cf.remaining_notional().round_dp(6).to_string(),
        }
    }
}

/// Prints cash flows as a titled table or as CSV rows.
pub fn print_cash_flows(cash_flows: &[CashFlow], format: OutputFormat) -> Result<()> {
    let rows: Vec<CashFlowRow> = cash_flows.iter().map(CashFlowRow::from).collect();
    if format == OutputFormat::Table {
        print_header("Cash Flows");
    }
    print_output(&rows, format)
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat) -> Result<()> {
    let config = args.input.load_config()?;
    let terms = args.input.load_terms(&config)?;
    let engine = AnalyticsEngine::new(config)?;

    let cash_flows = engine.schedule(&terms)?;

    match format {
        OutputFormat::Json => print_json(&cash_flows),
        OutputFormat::Table | OutputFormat::Csv => print_cash_flows(&cash_flows, format),
    }
}
