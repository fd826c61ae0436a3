//! Bracketed secant iteration with bisection fallback.

use rust_decimal::Decimal;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Secant steps that never leave the bracket `[a, b]`.
///
/// Each iteration proposes the secant through the two latest iterates. The
/// proposal is replaced by the bracket midpoint when it falls outside the
/// bracket, when the secant is undefined, or when the same bracket end has
/// moved twice in a row (the slow one-sided case of regula falsi).
///
/// # Errors
///
/// - `InvalidBracket` when `f(a)` and `f(b)` share a sign
/// - `ConvergenceFailed` when `config.max_iterations` is exhausted
pub fn secant_bisection<F>(
    f: F,
    a: Decimal,
    b: Decimal,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(Decimal) -> MathResult<Decimal>,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
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

    let (mut x0, mut f0) = (lo, f_lo);
    let (mut x1, mut f1) = (hi, f_hi);
    let mut best = f_lo.abs().min(f_hi.abs());
    let mut last_moved_lo: Option<bool> = None;
    let mut repeats = 0u32;

    for iteration in 1..=config.max_iterations {
        let secant = secant_point(x0, f0, x1, f1).filter(|x| *x > lo && *x < hi);
        let candidate = match secant {
            Some(x) if repeats < 2 => x,
            _ => {
                repeats = 0;
                (lo + hi) / Decimal::TWO
            }
        };

        let fc = f(candidate)?;
        best = best.min(fc.abs());
        if fc.abs() < config.tolerance {
            return Ok(SolverResult {
                root: candidate,
                iterations: iteration,
                residual: fc,
            });
        }

        let moved_lo = same_sign(fc, f_lo);
        if moved_lo {
            lo = candidate;
            f_lo = fc;
        } else {
            hi = candidate;
        }
        if last_moved_lo == Some(moved_lo) {
            repeats += 1;
        } else {
            repeats = 0;
        }
        last_moved_lo = Some(moved_lo);

        (x0, f0) = (x1, f1);
        (x1, f1) = (candidate, fc);
    }

    Err(MathError::convergence_failed(config.max_iterations, best))
}

fn secant_point(x0: Decimal, f0: Decimal, x1: Decimal, f1: Decimal) -> Option<Decimal> {
    if f1 == f0 {
        return None;
    }
    let step = f1.checked_mul(x1 - x0)?.checked_div(f1 - f0)?;
    x1.checked_sub(step)
}

pub(crate) fn same_sign(a: Decimal, b: Decimal) -> bool {
    a.is_sign_negative() == b.is_sign_negative()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cubic_root() {
        // x^3 - x - 2 has a single real root near 1.5213797
        let f = |x: Decimal| Ok(x * x * x - x - dec!(2));
        let result = secant_bisection(f, dec!(1), dec!(2), &SolverConfig::default()).unwrap();

        assert!((result.root - dec!(1.5213797068)).abs() < dec!(0.000000001));
        assert!(result.residual.abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_one_sided_function_still_converges() {
        // Strongly convex: plain regula falsi would crawl from one side
        let f = |x: Decimal| Ok(x * x * x * x * x * x * x * x * x * x - dec!(0.5));
        let result = secant_bisection(f, dec!(0), dec!(1.5), &SolverConfig::default()).unwrap();
        assert!(result.residual.abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: Decimal| Ok(x * x + Decimal::ONE);
        let err = secant_bisection(f, dec!(-1), dec!(1), &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::InvalidBracket { .. }));
    }

    #[test]
    fn test_endpoint_root() {
        let f = |x: Decimal| Ok(x - dec!(2));
        let result = secant_bisection(f, dec!(2), dec!(3), &SolverConfig::default()).unwrap();
        assert_eq!(result.root, dec!(2));
        assert_eq!(result.iterations, 0);
    }
}
