//! Benchmark curve providers.
//!
//! The analytics engine never fetches market data itself. A
//! [`BenchmarkCurveProvider`] hands it a point snapshot for a date; caching,
//! refresh and network access are the provider's business.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bondlab_core::Date;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{CurveError, CurveResult};
use crate::point::CurvePoint;

/// Supplies benchmark curve points as of a date.
pub trait BenchmarkCurveProvider: Send + Sync {
    /// Returns the curve points observed on `as_of`.
    fn get_curve(&self, as_of: Date) -> CurveResult<Vec<CurvePoint>>;
}

/// Serves one fixed snapshot regardless of date.
#[derive(Debug, Clone, Default)]
pub struct StaticCurveProvider {
    points: Vec<CurvePoint>,
}

impl StaticCurveProvider {
    /// Creates a provider serving `points`.
    #[must_use]
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }
}

impl BenchmarkCurveProvider for StaticCurveProvider {
    fn get_curve(&self, _as_of: Date) -> CurveResult<Vec<CurvePoint>> {
        if self.points.is_empty() {
            return Err(CurveError::unavailable("no curve points loaded"));
        }
        Ok(self.points.clone())
    }
}

/// Reads a `maturity_years,yield_pct` CSV file on every request.
#[derive(Debug, Clone)]
pub struct CsvCurveProvider {
    path: PathBuf,
}

impl CsvCurveProvider {
    /// Creates a provider for the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BenchmarkCurveProvider for CsvCurveProvider {
    fn get_curve(&self, _as_of: Date) -> CurveResult<Vec<CurvePoint>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            CurveError::unavailable(format!("{}: {e}", self.path.display()))
        })?;
        read_curve_csv(file)
    }
}

#[derive(Debug, Deserialize)]
struct CurveRecord {
    #[serde(alias = "maturity", alias = "tenor_years")]
    maturity_years: String,
    #[serde(alias = "yield", alias = "rate")]
    yield_pct: String,
}

/// Parses curve points from CSV with a `maturity_years,yield_pct` header.
pub fn read_curve_csv<R: Read>(reader: R) -> CurveResult<Vec<CurvePoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (row, result) in reader.deserialize::<CurveRecord>().enumerate() {
        let record = result.map_err(|e| CurveError::unavailable(format!("row {}: {e}", row + 1)))?;
        let maturity = parse_decimal(row, "maturity_years", &record.maturity_years)?;
        let yield_pct = parse_decimal(row, "yield_pct", &record.yield_pct)?;
        points.push(CurvePoint::new(maturity, yield_pct));
    }

    Ok(points)
}

fn parse_decimal(row: usize, column: &str, value: &str) -> CurveResult<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        CurveError::unavailable(format!("row {}: bad {column} '{value}': {e}", row + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::tests::sample_points;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn today() -> Date {
        Date::from_ymd(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticCurveProvider::new(sample_points());
        assert_eq!(provider.get_curve(today()).unwrap().len(), 8);

        let empty = StaticCurveProvider::default();
        assert!(matches!(
            empty.get_curve(today()),
            Err(CurveError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_read_curve_csv() {
        let csv = "maturity_years,yield_pct\n0.25, 5.25\n1,4.80\n10,4.20\n";
        let points = read_curve_csv(csv.as_bytes()).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], CurvePoint::new(dec!(0.25), dec!(5.25)));
        assert_eq!(points[2].yield_pct, dec!(4.20));
    }

    #[test]
    fn test_read_curve_csv_rejects_garbage() {
        let csv = "maturity_years,yield_pct\nten,4.2\n";
        let err = read_curve_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("maturity_years"));
    }

    #[test]
    fn test_csv_provider() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "maturity,yield").unwrap();
        for p in sample_points() {
            writeln!(file, "{},{}", p.maturity_years, p.yield_pct).unwrap();
        }

        let provider = CsvCurveProvider::new(file.path());
        assert_eq!(provider.get_curve(today()).unwrap(), sample_points());

        let missing = CsvCurveProvider::new("/nonexistent/curve.csv");
        assert!(missing.get_curve(today()).is_err());
    }
}
