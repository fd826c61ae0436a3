//! 30/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn thirty_day_count(y1: i64, m1: i64, d1: i64, y2: i64, m2: i64, d2: i64) -> i64 {
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

// =============================================================================
// 30/360 (Bond Basis)
// =============================================================================

/// 30/360 day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 and D1 is now 30, change D2 to 30
///
/// February month-ends are left as they are.
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn unchecked_year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        thirty_day_count(
            i64::from(start.year()),
            i64::from(start.month()),
            d1,
            i64::from(end.year()),
            i64::from(end.month()),
            d2,
        )
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 day count convention (Eurobond Basis).
///
/// Both endpoints are clamped to 30 independently; there is no cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &str {
        "30E/360"
    }

    fn unchecked_year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        thirty_day_count(
            i64::from(start.year()),
            i64::from(start.month()),
            i64::from(start.day().min(30)),
            i64::from(end.year()),
            i64::from(end.month()),
            i64::from(end.day().min(30)),
        )
    }
}
