//! Fixed-budget bisection.

use rust_decimal::Decimal;

use super::hybrid::same_sign;
use crate::error::{MathError, MathResult};
use crate::solvers::SolverResult;

/// Bisection over `[a, b]` with a fixed iteration budget.
///
/// Stops early when `|f(mid)| < tolerance`. Otherwise it runs all
/// `max_iterations` halvings and returns the final midpoint whatever its
/// residual; the caller judges whether that residual is acceptable.
///
/// # Errors
///
/// `InvalidBracket` when `f(a)` and `f(b)` share a sign, and any error
/// raised by `f`.
///
/// # Example
///
/// ```rust
/// use bondlab_math::solvers::bisection;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let f = |x: Decimal| Ok(x * x - dec!(2));
/// let result = bisection(f, dec!(1), dec!(2), 100, dec!(0.0000000001)).unwrap();
/// assert!((result.root - dec!(1.41421356237)).abs() < dec!(0.00000000001));
/// ```
pub fn bisection<F>(
    f: F,
    a: Decimal,
    b: Decimal,
    max_iterations: u32,
    tolerance: Decimal,
) -> MathResult<SolverResult>
where
    F: Fn(Decimal) -> MathResult<Decimal>,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_lo.abs() < tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }
    if same_sign(f_lo, f_hi) {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut mid = (lo + hi) / Decimal::TWO;
    let mut f_mid = f(mid)?;

    for iteration in 1..=max_iterations {
        if f_mid.abs() < tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if same_sign(f_mid, f_lo) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }

        let next = (lo + hi) / Decimal::TWO;
        if next == mid {
            // Interval below decimal resolution
            break;
        }
        mid = next;
        f_mid = f(mid)?;
    }

    Ok(SolverResult {
        root: mid,
        iterations: max_iterations,
        residual: f_mid,
    })
}
