//! Validate command implementation.

use anyhow::Result;
use bondlab_bonds::{BondError, ValidationReport};
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::TermsArgs;
use crate::error::CliError;
use crate::output::{print_error, print_json, print_output, print_success, print_warning, KeyValue};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: TermsArgs,
}

/// Execute the validate command.
///
/// Exits with an error when the terms are invalid, after printing every
/// problem found.
pub fn execute(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let config = args.input.load_config()?;
    let input = args.input.read_input()?;

    // Undecodable fields are reported like any other validation error.
    let report = match input.into_terms(config.schedule.end_of_month) {
        Ok(terms) => terms.validate_with(&config.schedule_limits()),
        Err(BondError::InvalidTerms { errors }) => ValidationReport {
            valid: false,
            errors,
            warnings: Vec::new(),
        },
        Err(BondError::MissingField { field }) => ValidationReport {
            valid: false,
            errors: vec![format!("missing {field}")],
            warnings: Vec::new(),
        },
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Table => {
            for warning in &report.warnings {
                print_warning(warning);
            }
            for error in &report.errors {
                print_error(error);
            }
            if report.valid {
                print_success(&format!("{} is valid", args.input.terms.display()));
            }
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => {
            let rows: Vec<KeyValue> = report
                .errors
                .iter()
                .map(|e| KeyValue::new("error", e.as_str()))
                .chain(report.warnings.iter().map(|w| KeyValue::new("warning", w.as_str())))
                .collect();
            print_output(&rows, format)?;
        }
    }

    if !report.valid {
        return Err(CliError::InvalidTerms {
            path: args.input.terms,
            count: report.errors.len(),
        }
        .into());
    }

    Ok(())
}
