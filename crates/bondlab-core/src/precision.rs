//! Checked high-precision decimal arithmetic.
//!
//! Every monetary amount and rate in the engine is a `rust_decimal::Decimal`
//! (28 significant digits). This module wraps the operations that can fail
//! so that failures surface as [`CoreError`] values instead of panics:
//!
//! - division raises `DivisionByZero`
//! - fractional powers and roots of negative numbers raise `NegativeRadicand`
//! - results beyond the decimal range raise `Overflow`
//!
//! `exp` and `ln` are evaluated by range reduction plus power series so that
//! solvers iterating 100 times do not accumulate the error of a low-order
//! approximation. Conversion to `f64` is one-way and for display only.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult};

/// ln(2) to 28 significant digits.
const LN_2: Decimal = dec!(0.6931471805599453094172321215);

/// Beyond this |x|, `exp` overflows (positive) or underflows to zero (negative).
const EXP_LIMIT: Decimal = dec!(66);

const SERIES_TERMS: u32 = 60;

/// Checked addition.
pub fn add(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_add(b).ok_or_else(|| CoreError::overflow("add"))
}

/// Checked subtraction.
pub fn sub(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| CoreError::overflow("sub"))
}

/// Checked multiplication.
pub fn mul(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| CoreError::overflow("mul"))
}

/// Checked division.
///
/// # Errors
///
/// `DivisionByZero` when `denominator` is zero, `Overflow` when the quotient
/// does not fit.
pub fn div(numerator: Decimal, denominator: Decimal) -> CoreResult<Decimal> {
    if denominator.is_zero() {
        return Err(CoreError::division_by_zero(format!("{numerator} / 0")));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CoreError::overflow("div"))
}

/// Integer power by binary exponentiation.
///
/// Negative exponents divide, so `powi(0, -1)` raises `DivisionByZero`.
pub fn powi(base: Decimal, exponent: i64) -> CoreResult<Decimal> {
    let mut result = Decimal::ONE;
    let mut factor = base;
    let mut n = exponent.unsigned_abs();

    while n > 0 {
        if n & 1 == 1 {
            result = mul(result, factor)?;
        }
        n >>= 1;
        if n > 0 {
            factor = mul(factor, factor)?;
        }
    }

    if exponent < 0 {
        div(Decimal::ONE, result)
    } else {
        Ok(result)
    }
}

/// Real power `base^exponent`.
///
/// Whole exponents go through [`powi`] and accept any base. Fractional
/// exponents require a non-negative base.
pub fn pow(base: Decimal, exponent: Decimal) -> CoreResult<Decimal> {
    if exponent.fract().is_zero() {
        if let Some(n) = exponent.to_i64() {
            return powi(base, n);
        }
    }
    if base.is_sign_negative() && !base.is_zero() {
        return Err(CoreError::negative_radicand("pow", base));
    }
    if base.is_zero() {
        return if exponent.is_sign_positive() {
            Ok(Decimal::ZERO)
        } else {
            Err(CoreError::division_by_zero(format!("0^{exponent}")))
        };
    }
    exp(mul(exponent, ln(base)?)?)
}

/// Discount factor `1 / base^periods`.
///
/// A power too large to represent discounts to zero rather than failing.
pub fn discount_factor(base: Decimal, periods: Decimal) -> CoreResult<Decimal> {
    match pow(base, periods) {
        Ok(growth) => div(Decimal::ONE, growth),
        Err(CoreError::Overflow { .. }) => Ok(Decimal::ZERO),
        Err(e) => Err(e),
    }
}

/// Square root.
pub fn sqrt(value: Decimal) -> CoreResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::negative_radicand("sqrt", value));
    }
    value.sqrt().ok_or_else(|| CoreError::overflow("sqrt"))
}

/// Exponential function.
///
/// Reduces `x = n ln2 + r` with `|r| <= ln2 / 2`, sums the Taylor series of
/// `e^r` and rescales by `2^n`.
pub fn exp(x: Decimal) -> CoreResult<Decimal> {
    if x > EXP_LIMIT {
        return Err(CoreError::overflow(format!("exp({x})")));
    }
    if x < -EXP_LIMIT {
        return Ok(Decimal::ZERO);
    }

    let n = (x / LN_2).round();
    let r = x - n * LN_2;

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for k in 1..=SERIES_TERMS {
        term = term * r / Decimal::from(k);
        if term.is_zero() {
            break;
        }
        sum += term;
    }

    let shift = n.to_i64().unwrap_or(0);
    let scale = powi(Decimal::TWO, shift.abs())?;
    if shift >= 0 {
        mul(sum, scale)
    } else {
        div(sum, scale)
    }
}

/// Natural logarithm.
///
/// Reduces `x = m 2^k` with `m` in `[0.5, 1]` and evaluates
/// `ln m = 2 atanh((m - 1) / (m + 1))` by its odd power series.
pub fn ln(x: Decimal) -> CoreResult<Decimal> {
    if x <= Decimal::ZERO {
        return Err(CoreError::negative_radicand("ln", x));
    }
    if x == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let mut m = x;
    let mut k: i64 = 0;
    while m > Decimal::ONE {
        m /= Decimal::TWO;
        k += 1;
    }
    while m < dec!(0.5) {
        m *= Decimal::TWO;
        k -= 1;
    }

    let z = (m - Decimal::ONE) / (m + Decimal::ONE);
    let z2 = z * z;
    let mut power = z;
    let mut series = Decimal::ZERO;
    for n in 0..SERIES_TERMS {
        let term = power / Decimal::from(2 * n + 1);
        if term.is_zero() {
            break;
        }
        series += term;
        power *= z2;
    }

    Ok(Decimal::TWO * series + Decimal::from(k) * LN_2)
}

/// Absolute value.
#[must_use]
pub fn abs(value: Decimal) -> Decimal {
    value.abs()
}

/// Smaller of two values.
#[must_use]
pub fn min(a: Decimal, b: Decimal) -> Decimal {
    a.min(b)
}

/// Larger of two values.
#[must_use]
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    a.max(b)
}

/// True when `|a - b| <= tolerance`.
#[must_use]
pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// Rounds half away from zero to `dp` places.
#[must_use]
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-point rendering: `format_fixed(dec!(1.005), 2) == "1.01"`.
#[must_use]
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round(value, dp))
}

/// Percentage rendering of a decimal rate: `0.05125` becomes `"5.125%"` at 3 dp.
#[must_use]
pub fn format_percent(rate: Decimal, dp: u32) -> String {
    format!("{}%", format_fixed(rate * Decimal::ONE_HUNDRED, dp))
}

/// Basis-point rendering of a decimal rate: `0.0125` becomes `"125.0 bps"` at 1 dp.
#[must_use]
pub fn format_bps(rate: Decimal, dp: u32) -> String {
    format!("{} bps", format_fixed(rate * Decimal::from(10_000), dp))
}

/// Converts to `f64` for display and plotting. Never feed the result back
/// into the engine.
#[must_use]
pub fn to_display_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIGHT: Decimal = dec!(0.00000000000000000001);

    #[test]
    fn test_division_by_zero_raises() {
        let err = div(dec!(1), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, CoreError::DivisionByZero { .. }));
        assert_eq!(div(dec!(1), dec!(8)).unwrap(), dec!(0.125));
    }

    #[test]
    fn test_overflow_raises() {
        assert!(matches!(
            mul(Decimal::MAX, dec!(2)),
            Err(CoreError::Overflow { .. })
        ));
    }

    #[test]
    fn test_powi() {
        assert_eq!(powi(dec!(1.05), 2).unwrap(), dec!(1.1025));
        assert_eq!(powi(dec!(2), 10).unwrap(), dec!(1024));
        assert_eq!(powi(dec!(2), -2).unwrap(), dec!(0.25));
        assert_eq!(powi(dec!(-3), 3).unwrap(), dec!(-27));
        assert_eq!(powi(dec!(7), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_exp_known_values() {
        let e = dec!(2.7182818284590452353602874714);
        assert!(approx_eq(exp(Decimal::ONE).unwrap(), e, TIGHT));
        assert_eq!(exp(Decimal::ZERO).unwrap(), Decimal::ONE);
        assert!(approx_eq(
            exp(-Decimal::ONE).unwrap(),
            dec!(0.3678794411714423215955237702),
            TIGHT
        ));
    }

    #[test]
    fn test_exp_limits() {
        assert!(matches!(exp(dec!(100)), Err(CoreError::Overflow { .. })));
        assert_eq!(exp(dec!(-100)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_ln_known_values() {
        assert!(approx_eq(ln(dec!(2)).unwrap(), LN_2, TIGHT));
        assert!(approx_eq(
            ln(dec!(10)).unwrap(),
            dec!(2.3025850929940456840179914547),
            TIGHT
        ));
        assert!(approx_eq(
            ln(dec!(0.025)).unwrap(),
            dec!(-3.6888794541139363028524556976),
            TIGHT
        ));
    }

    #[test]
    fn test_exp_ln_round_trip_needs_several_doublings() {
        for x in [dec!(0.025), dec!(0.0001), dec!(1234.5)] {
            let back = exp(ln(x).unwrap()).unwrap();
            assert!(approx_eq(back, x, x * dec!(0.000000000000000000001)));
        }
    }

    #[test]
    fn test_ln_rejects_non_positive() {
        assert!(matches!(
            ln(dec!(-1)),
            Err(CoreError::NegativeRadicand { .. })
        ));
        assert!(ln(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_fractional_pow() {
        // 1.025^0.5 = sqrt(1.025)
        let via_pow = pow(dec!(1.025), dec!(0.5)).unwrap();
        let via_sqrt = sqrt(dec!(1.025)).unwrap();
        assert!(approx_eq(via_pow, via_sqrt, dec!(0.000000000000000001)));

        // Whole exponents stay exact
        assert_eq!(pow(dec!(1.05), dec!(2)).unwrap(), dec!(1.1025));
    }

    #[test]
    fn test_negative_radicand() {
        assert!(matches!(
            pow(dec!(-0.5), dec!(1.5)),
            Err(CoreError::NegativeRadicand { .. })
        ));
        assert!(matches!(
            sqrt(dec!(-4)),
            Err(CoreError::NegativeRadicand { .. })
        ));
        // Whole powers of negative numbers are fine
        assert_eq!(pow(dec!(-0.5), dec!(2)).unwrap(), dec!(0.25));
    }

    #[test]
    fn test_discount_factor() {
        let df = discount_factor(dec!(1.025), dec!(2)).unwrap();
        assert!(approx_eq(df, Decimal::ONE / dec!(1.050625), TIGHT));
        // Overflowing growth discounts to zero
        assert_eq!(
            discount_factor(dec!(1000), dec!(40)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_min_max_abs() {
        assert_eq!(min(dec!(1), dec!(2)), dec!(1));
        assert_eq!(max(dec!(1), dec!(2)), dec!(2));
        assert_eq!(abs(dec!(-3.5)), dec!(3.5));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_fixed(dec!(1.005), 2), "1.01");
        assert_eq!(format_fixed(dec!(99), 3), "99.000");
        assert_eq!(format_percent(dec!(0.05125), 3), "5.125%");
        assert_eq!(format_bps(dec!(0.0125), 1), "125.0 bps");
        assert_eq!(format_bps(dec!(-0.00035), 0), "-4 bps");
    }

    #[test]
    fn test_display_conversion() {
        assert!((to_display_f64(dec!(4.375)) - 4.375).abs() < 1e-12);
    }
}
