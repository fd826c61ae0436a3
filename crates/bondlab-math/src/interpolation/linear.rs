//! Linear interpolation with flat extrapolation.

use rust_decimal::Decimal;

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// Queries outside `[min_x, max_x]` return the nearest endpoint's value
/// exactly (flat extrapolation); they are never an error.
///
/// # Example
///
/// ```rust
/// use bondlab_math::interpolation::{Interpolator, LinearInterpolator};
/// use rust_decimal_macros::dec;
///
/// let interp = LinearInterpolator::new(
///     vec![dec!(1), dec!(2), dec!(5)],
///     vec![dec!(4.0), dec!(4.2), dec!(4.8)],
/// ).unwrap();
///
/// assert_eq!(interp.interpolate(dec!(1.5)), dec!(4.1));
/// assert_eq!(interp.interpolate(dec!(30)), dec!(4.8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<Decimal>,
    ys: Vec<Decimal>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<Decimal>, ys: Vec<Decimal>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self { xs, ys })
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: Decimal) -> usize {
        let last = self.xs.len() - 2;
        match self.xs.binary_search(&x) {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: Decimal) -> Decimal {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        // x1 > x0 is guaranteed by construction
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    fn min_x(&self) -> Decimal {
        self.xs[0]
    }

    fn max_x(&self) -> Decimal {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn curve() -> LinearInterpolator {
        LinearInterpolator::new(
            vec![dec!(0.25), dec!(1), dec!(5), dec!(10)],
            vec![dec!(5.30), dec!(5.00), dec!(4.20), dec!(4.50)],
        )
        .unwrap()
    }

    #[test]
    fn test_hits_knots_exactly() {
        let interp = curve();
        assert_eq!(interp.interpolate(dec!(1)), dec!(5.00));
        assert_eq!(interp.interpolate(dec!(5)), dec!(4.20));
    }

    #[test]
    fn test_between_knots() {
        let interp = curve();
        assert_eq!(interp.interpolate(dec!(3)), dec!(4.60));
        assert_eq!(interp.interpolate(dec!(7.5)), dec!(4.35));
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = curve();
        assert_eq!(interp.interpolate(dec!(0.01)), dec!(5.30));
        assert_eq!(interp.interpolate(dec!(30)), dec!(4.50));
        assert!(!interp.in_range(dec!(30)));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            LinearInterpolator::new(vec![dec!(1)], vec![dec!(1)]),
            Err(MathError::InsufficientData { .. })
        ));
        assert!(LinearInterpolator::new(vec![dec!(1), dec!(1)], vec![dec!(1), dec!(2)]).is_err());
        assert!(LinearInterpolator::new(vec![dec!(1), dec!(2)], vec![dec!(1)]).is_err());
    }
}
