//! Interpolation over sparse `(x, y)` data.
//!
//! - [`LinearInterpolator`]: piecewise-linear with flat extrapolation

mod linear;

pub use linear::LinearInterpolator;

use rust_decimal::Decimal;

/// Trait for one-dimensional interpolators.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: Decimal) -> Decimal;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> Decimal;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> Decimal;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: Decimal) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
