//! Analyze command implementation.
//!
//! Runs the full analytics pipeline for one bond and quote.

use std::path::PathBuf;

use anyhow::Result;
use bondlab_analytics::spreads::ZSpreadOutcome;
use bondlab_analytics::{AnalyticsEngine, BondAnalytics, MarketQuote};
use bondlab_core::types::Date;
use bondlab_curves::CsvCurveProvider;
use clap::{ArgGroup, Args};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::schedule::print_cash_flows;
use crate::commands::{load_holidays, parse_date, TermsArgs};
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("quote").required(true).args(["price", "yield_pct"])))]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: TermsArgs,

    /// Settlement date (YYYY-MM-DD). Defaults to today plus the bond's settlement lag.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Clean price in percent of outstanding notional
    #[arg(short, long)]
    pub price: Option<Decimal>,

    /// Yield to maturity in percent (e.g. 5.1)
    #[arg(short = 'y', long = "yield")]
    pub yield_pct: Option<Decimal>,

    /// Outstanding notional the quote refers to. Derived from the schedule when omitted.
    #[arg(long)]
    pub notional: Option<Decimal>,

    /// Holiday dates, one YYYY-MM-DD per line, for BUS/252 and settlement lag
    #[arg(long)]
    pub holidays: Option<PathBuf>,

    /// Benchmark curve CSV with `maturity_years,yield_pct` columns
    #[arg(short, long)]
    pub curve: Option<PathBuf>,

    /// Show cash flows
    #[arg(long)]
    pub cashflows: bool,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let config = args.input.load_config()?;
    let terms = args.input.load_terms(&config)?;

    let mut engine = AnalyticsEngine::new(config)?;
    if let Some(path) = &args.holidays {
        engine = engine.with_calendar(load_holidays(path)?);
    }

    let settlement = match args.settlement.as_deref() {
        Some(s) => parse_date(s)?,
        None => engine.settlement_date(&terms, Date::today()),
    };

    let mut quote =
        MarketQuote::from_options(args.price, args.yield_pct.map(|y| y / Decimal::ONE_HUNDRED))?;
    if let Some(notional) = args.notional {
        quote = quote.with_outstanding_notional(notional);
    }

    let result = match &args.curve {
        Some(path) => {
            debug!(path = %path.display(), "loading benchmark curve");
            engine.analyze_with_provider(&terms, settlement, &quote, &CsvCurveProvider::new(path))?
        }
        None => engine.analyze(&terms, settlement, &quote, None)?,
    };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Csv => {
            let rows: Vec<KeyValue> = summary(&result)
                .into_iter()
                .filter(|r| !r.is_separator())
                .collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Table => {
            print_header("Bond Analytics");
            print_output(&summary(&result), format)?;

            if !result.yields.exercises.is_empty() {
                print_header("Exercise Scenarios");
                print_output(&exercise_rows(&result), format)?;
            }

            if args.cashflows {
                print_cash_flows(&result.cash_flows, format)?;
            }
        }
    }

    Ok(())
}

fn summary(result: &BondAnalytics) -> Vec<KeyValue> {
    let mut rows = Vec::new();

    rows.push(KeyValue::new(
        "Bond",
        result.bond_id.as_deref().unwrap_or("-"),
    ));
    rows.push(KeyValue::new("Settlement", result.settlement.to_string()));
    rows.push(KeyValue::from_decimal(
        "Outstanding Notional",
        result.outstanding_notional,
        2,
    ));
    rows.push(KeyValue::separator());

    let yields = &result.yields;
    rows.push(KeyValue::from_rate("Yield to Maturity", yields.ytm));
    rows.push(KeyValue::from_rate("Yield to Worst", yields.ytw));
    rows.push(KeyValue::new(
        "Worst Date",
        format!("{} ({})", yields.ytw_date, yields.ytw_kind),
    ));
    rows.push(KeyValue::from_rate("Current Yield", yields.current_yield));
    rows.push(KeyValue::separator());

    let prices = &result.prices;
    rows.push(KeyValue::from_decimal("Clean Price", prices.clean_pct, 6));
    rows.push(KeyValue::from_decimal("Dirty Price", prices.dirty_pct, 6));
    rows.push(KeyValue::from_decimal("Accrued Interest", prices.accrued_amount, 6));
    rows.push(KeyValue::from_decimal("Dirty Amount", prices.dirty_amount, 6));
    rows.push(KeyValue::separator());

    let risk = &result.risk;
    rows.push(KeyValue::from_decimal("Macaulay Duration", risk.macaulay_duration, 4));
    rows.push(KeyValue::from_decimal("Modified Duration", risk.modified_duration, 4));
    rows.push(KeyValue::from_decimal("Effective Duration", risk.effective_duration, 4));
    rows.push(KeyValue::from_decimal("Convexity", risk.convexity, 4));
    rows.push(KeyValue::from_decimal("DV01", risk.dv01, 6));
    rows.push(KeyValue::from_decimal("Average Life", risk.average_life, 4));

    if let Some(spreads) = &result.spreads {
        rows.push(KeyValue::separator());
        rows.push(KeyValue::new(
            "Benchmark Yield",
            format!("{}%", spreads.benchmark_yield_pct.round_dp(4)),
        ));
        rows.push(KeyValue::from_bps("Nominal Spread", spreads.nominal.as_bps()));
        rows.push(match spreads.z_spread {
            ZSpreadOutcome::Solved { bps, .. } => KeyValue::from_bps("Z-Spread", bps),
            ZSpreadOutcome::NotBracketed {
                lower_bps,
                upper_bps,
            } => KeyValue::new(
                "Z-Spread",
                format!("not bracketed in [{lower_bps}, {upper_bps}] bps"),
            ),
        });
    }

    let diagnostics = &result.diagnostics;
    rows.push(KeyValue::separator());
    rows.push(KeyValue::new("Solver", diagnostics.algorithm.name()));
    rows.push(KeyValue::new(
        "Solver Iterations",
        diagnostics.iterations.to_string(),
    ));
    rows.push(KeyValue::new(
        "Price Error",
        diagnostics.price_error.round_dp(10).to_string(),
    ));

    rows
}

#[derive(Debug, Serialize, Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Yield")]
    yield_rate: String,
}

fn exercise_rows(result: &BondAnalytics) -> Vec<ExerciseRow> {
    result
        .yields
        .exercises
        .iter()
        .map(|ex| ExerciseRow {
            date: ex.date.to_string(),
            kind: ex.kind.to_string(),
            price: ex.price_pct.to_string(),
            yield_rate: ex.yield_rate().map_or_else(
                || "failed".to_string(),
                |y| format!("{}%", (y * Decimal::ONE_HUNDRED).round_dp(4)),
            ),
        })
        .collect()
}
