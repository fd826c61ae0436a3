//! Damped Newton-Raphson root-finding algorithm.

use bondlab_core::precision;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson with a damped, bounded step.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` with two guards
/// that keep yield-like problems from diverging:
///
/// - the step magnitude is capped at `0.5 * |x_n| + 0.1`
/// - every iterate is clamped to `[config.lower_bound, config.upper_bound]`
///
/// Converges when `|f(x)| < config.tolerance`.
///
/// # Errors
///
/// - `DerivativeUnderflow` when `|f'(x)| < config.derivative_floor`
/// - `ConvergenceFailed` when the budget runs out or the iterate is pinned
///   at a bound
/// - any error raised by `f` or `df`
///
/// # Example
///
/// ```rust
/// use bondlab_math::solvers::{newton_raphson, SolverConfig};
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// // Root of x^2 - 2
/// let f = |x: Decimal| Ok(x * x - dec!(2));
/// let df = |x: Decimal| Ok(dec!(2) * x);
///
/// let result = newton_raphson(f, df, dec!(1.5), &SolverConfig::default()).unwrap();
/// assert!((result.root - dec!(1.41421356237)).abs() < dec!(0.00000000001));
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: Decimal,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(Decimal) -> MathResult<Decimal>,
    DF: Fn(Decimal) -> MathResult<Decimal>,
{
    let mut x = config.clamp(initial_guess);
    let mut fx = f(x)?;

    if fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: 0,
            residual: fx,
        });
    }

    for iteration in 1..=config.max_iterations {
        let dfx = df(x)?;
        if dfx.abs() < config.derivative_floor {
            return Err(MathError::DerivativeUnderflow { value: dfx });
        }

        let max_step = dec!(0.5) * x.abs() + dec!(0.1);
        let step = precision::div(fx, dfx)?.max(-max_step).min(max_step);
        let next = config.clamp(x - step);

        if next == x {
            // Pinned at a bound with the step pointing outward
            return Err(MathError::convergence_failed(iteration, fx.abs()));
        }

        x = next;
        fx = f(x)?;
        tracing::trace!(iteration, x = %x, residual = %fx, "newton step");

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_two() {
        let f = |x: Decimal| Ok(x * x - dec!(2));
        let df = |x: Decimal| Ok(dec!(2) * x);

        let result = newton_raphson(f, df, dec!(1.5), &SolverConfig::default()).unwrap();
        assert!((result.root - dec!(1.4142135623730950488)).abs() < dec!(0.0000000001));
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_step_is_damped() {
        // A far-off root takes several capped steps instead of one jump
        let f = |x: Decimal| Ok(x - dec!(3));
        let df = |_: Decimal| Ok(Decimal::ONE);

        let result = newton_raphson(f, df, Decimal::ZERO, &SolverConfig::default()).unwrap();
        assert_eq!(result.root, dec!(3));
        assert!(result.iterations > 1);
    }

    #[test]
    fn test_flat_derivative_underflows() {
        let f = |_: Decimal| Ok(Decimal::ONE);
        let df = |_: Decimal| Ok(Decimal::ZERO);

        let err = newton_raphson(f, df, dec!(0.05), &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::DerivativeUnderflow { .. }));
    }

    #[test]
    fn test_root_outside_bounds_fails() {
        // Root at 10 lies above the default upper bound of 5
        let f = |x: Decimal| Ok(x - dec!(10));
        let df = |_: Decimal| Ok(Decimal::ONE);

        let err = newton_raphson(f, df, dec!(1), &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::ConvergenceFailed { .. }));
    }

    #[test]
    fn test_evaluation_errors_propagate() {
        let f = |x: Decimal| -> MathResult<Decimal> { Ok(precision::div(Decimal::ONE, x)? - dec!(2)) };
        let df = |_: Decimal| Ok(Decimal::ONE);

        let err = newton_raphson(f, df, Decimal::ZERO, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::Core(_)));
    }
}
