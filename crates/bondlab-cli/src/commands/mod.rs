//! CLI command implementations.

pub mod analyze;
pub mod schedule;
pub mod validate;

pub use analyze::AnalyzeArgs;
pub use schedule::ScheduleArgs;
pub use validate::ValidateArgs;

use std::path::{Path, PathBuf};

use bondlab_bonds::{BondTerms, BondTermsInput};
use bondlab_config::AnalyticsConfig;
use bondlab_core::calendars::HolidayList;
use bondlab_core::types::Date;
use clap::Args;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Arguments shared by every command that reads a bond definition.
#[derive(Args, Debug, Clone)]
pub struct TermsArgs {
    /// Bond terms as a JSON file
    #[arg(short, long)]
    pub terms: PathBuf,

    /// Engine configuration (TOML or JSON)
    #[arg(long, env = "BONDLAB_CONFIG")]
    pub config: Option<PathBuf>,
}

impl TermsArgs {
    /// Loads the configuration, falling back to the defaults.
    pub fn load_config(&self) -> CliResult<AnalyticsConfig> {
        match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                Ok(AnalyticsConfig::load(path)?)
            }
            None => Ok(AnalyticsConfig::default()),
        }
    }

    /// Reads the terms file into its loosely typed form.
    pub fn read_input(&self) -> CliResult<BondTermsInput> {
        let json = read_file(&self.terms)?;
        Ok(BondTermsInput::from_json(&json)?)
    }

    /// Reads and converts the terms file.
    pub fn load_terms(&self, config: &AnalyticsConfig) -> CliResult<BondTerms> {
        Ok(self.read_input()?.into_terms(config.schedule.end_of_month)?)
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads a holiday list with one YYYY-MM-DD date per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn load_holidays(path: &Path) -> CliResult<HolidayList> {
    let text = read_file(path)?;
    let dates = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_date)
        .collect::<CliResult<Vec<_>>>()?;
    debug!(path = %path.display(), count = dates.len(), "loaded holidays");
    Ok(HolidayList::new(path.display().to_string(), dates))
}

/// Reads a whole file, naming it in the error.
pub fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-15").unwrap(),
            Date::from_ymd(2025, 1, 15).unwrap()
        );
        assert!(matches!(
            parse_date("15/01/2025"),
            Err(CliError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_load_holidays_skips_comments() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("holidays.txt");
        std::fs::write(&path, "# closures\n2025-01-01\n\n2025-12-25\n").unwrap();

        let holidays = load_holidays(&path).unwrap();
        assert_eq!(holidays.len(), 2);

        std::fs::write(&path, "2025-13-01\n").unwrap();
        assert!(matches!(
            load_holidays(&path),
            Err(CliError::InvalidDate(_))
        ));
    }
}
