//! Validated benchmark yield curves.

use bondlab_core::Date;
use bondlab_math::interpolation::{Interpolator, LinearInterpolator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::point::CurvePoint;

/// Sanity limits applied when a curve is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveLimits {
    /// Minimum number of points.
    pub min_points: usize,
    /// Largest allowed yield drop, in percentage points, between adjacent
    /// maturities.
    pub max_inversion_pct: Decimal,
}

impl Default for CurveLimits {
    fn default() -> Self {
        Self {
            min_points: 8,
            max_inversion_pct: dec!(1.50),
        }
    }
}

/// An immutable benchmark curve snapshot.
///
/// Points are sorted by maturity on construction. Yields between points
/// are linearly interpolated; queries outside the curve return the nearest
/// endpoint's yield.
///
/// # Example
///
/// ```rust
/// use bondlab_curves::{BenchmarkCurve, CurvePoint};
/// use rust_decimal_macros::dec;
///
/// let curve = BenchmarkCurve::new(vec![
///     CurvePoint::new(dec!(0.25), dec!(4.0)),
///     CurvePoint::new(dec!(0.5), dec!(4.1)),
///     CurvePoint::new(dec!(1), dec!(4.2)),
///     CurvePoint::new(dec!(2), dec!(4.3)),
///     CurvePoint::new(dec!(5), dec!(4.5)),
///     CurvePoint::new(dec!(10), dec!(4.7)),
///     CurvePoint::new(dec!(20), dec!(4.9)),
///     CurvePoint::new(dec!(30), dec!(5.0)),
/// ]).unwrap();
///
/// assert_eq!(curve.yield_at(dec!(1.5)), dec!(4.25));
/// assert_eq!(curve.yield_at(dec!(50)), dec!(5.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkCurve {
    as_of: Option<Date>,
    points: Vec<CurvePoint>,
    interpolator: LinearInterpolator,
}

impl BenchmarkCurve {
    /// Builds a curve under the default [`CurveLimits`].
    pub fn new(points: Vec<CurvePoint>) -> CurveResult<Self> {
        Self::with_limits(points, &CurveLimits::default())
    }

    /// Builds a curve, rejecting short, unsorted-duplicate or badly
    /// inverted point sets.
    pub fn with_limits(mut points: Vec<CurvePoint>, limits: &CurveLimits) -> CurveResult<Self> {
        if points.len() < limits.min_points {
            return Err(CurveError::InsufficientPoints {
                required: limits.min_points,
                got: points.len(),
            });
        }
        if let Some(bad) = points.iter().find(|p| p.maturity_years <= Decimal::ZERO) {
            return Err(CurveError::InvalidMaturity {
                maturity: bad.maturity_years,
            });
        }

        points.sort_by(|a, b| a.maturity_years.cmp(&b.maturity_years));

        for pair in points.windows(2) {
            let (short, long) = (pair[0], pair[1]);
            if short.maturity_years == long.maturity_years {
                return Err(CurveError::DuplicateMaturity {
                    maturity: short.maturity_years,
                });
            }
            let drop = short.yield_pct - long.yield_pct;
            if drop > limits.max_inversion_pct {
                return Err(CurveError::ExcessiveInversion {
                    short: short.maturity_years,
                    long: long.maturity_years,
                    drop,
                    limit: limits.max_inversion_pct,
                });
            }
        }

        let interpolator = LinearInterpolator::new(
            points.iter().map(|p| p.maturity_years).collect(),
            points.iter().map(|p| p.yield_pct).collect(),
        )?;

        Ok(Self {
            as_of: None,
            points,
            interpolator,
        })
    }

    /// Tags the curve with its observation date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Observation date, if known.
    #[must_use]
    pub fn as_of(&self) -> Option<Date> {
        self.as_of
    }

    /// Points sorted by maturity.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve holds at least its minimum point count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shortest maturity in years.
    #[must_use]
    pub fn min_maturity(&self) -> Decimal {
        self.interpolator.min_x()
    }

    /// Longest maturity in years.
    #[must_use]
    pub fn max_maturity(&self) -> Decimal {
        self.interpolator.max_x()
    }

    /// Yield in percent at a maturity in years.
    #[must_use]
    pub fn yield_at(&self, maturity_years: Decimal) -> Decimal {
        self.interpolator.interpolate(maturity_years)
    }

    /// Yield as a decimal rate (`0.045` for 4.5%) at a maturity in years.
    #[must_use]
    pub fn rate_at(&self, maturity_years: Decimal) -> Decimal {
        self.yield_at(maturity_years) / Decimal::ONE_HUNDRED
    }
}
