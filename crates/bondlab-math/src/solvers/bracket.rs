//! Bracket discovery by probe scanning.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{MathError, MathResult};

/// Default yield probe ladder, from -99% to +500%.
pub const DEFAULT_PROBES: [Decimal; 20] = [
    dec!(-0.99),
    dec!(-0.75),
    dec!(-0.5),
    dec!(-0.25),
    dec!(-0.1),
    dec!(-0.05),
    dec!(0),
    dec!(0.01),
    dec!(0.02),
    dec!(0.03),
    dec!(0.05),
    dec!(0.075),
    dec!(0.1),
    dec!(0.15),
    dec!(0.2),
    dec!(0.3),
    dec!(0.5),
    dec!(1.0),
    dec!(2.0),
    dec!(5.0),
];

/// Finds the first adjacent pair of probes across which `f` changes sign.
///
/// Probes are evaluated in ascending order. A probe whose evaluation fails
/// (for instance a discount factor that overflows near -100%) is skipped.
/// A probe where `f` is exactly zero is returned as a degenerate bracket.
///
/// # Errors
///
/// `NoBracket` when no sign change is found.
pub fn scan_bracket<F>(f: F, probes: &[Decimal]) -> MathResult<(Decimal, Decimal)>
where
    F: Fn(Decimal) -> MathResult<Decimal>,
{
    let mut ladder = probes.to_vec();
    ladder.sort();
    ladder.dedup();

    let mut previous: Option<(Decimal, Decimal)> = None;
    let mut evaluated = 0usize;

    for &x in &ladder {
        let fx = match f(x) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(probe = %x, %error, "skipping probe");
                continue;
            }
        };
        evaluated += 1;

        if fx.is_zero() {
            return Ok((x, x));
        }
        if let Some((px, pfx)) = previous {
            if pfx.is_sign_negative() != fx.is_sign_negative() {
                return Ok((px, x));
            }
        }
        previous = Some((x, fx));
    }

    Err(MathError::NoBracket {
        probes: evaluated,
        lower: ladder.first().copied().unwrap_or_default(),
        upper: ladder.last().copied().unwrap_or_default(),
    })
}
