//! Actual/Actual day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual day count convention.
///
/// The period is split at calendar-year boundaries; each piece contributes
/// its actual days over the actual length of its own year.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActAct;

impl DayCount for ActAct {
    fn name(&self) -> &str {
        "ACT/ACT"
    }

    fn unchecked_year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start >= end {
            return Decimal::ZERO;
        }

        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            let next_year = current.start_of_next_year();
            let days = current.days_between(&next_year);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = next_year;
        }

        if current < end {
            let days = current.days_between(&end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_whole_years() {
        assert_eq!(ActAct.year_fraction(d(2023, 1, 1), d(2024, 1, 1)).unwrap(), dec!(1));
        assert_eq!(ActAct.year_fraction(d(2024, 1, 1), d(2026, 1, 1)).unwrap(), dec!(2));
    }

    #[test]
    fn test_split_across_leap_boundary() {
        // 2023-11-01 -> 2024-03-01: 61/365 + 60/366
        let yf = ActAct.year_fraction(d(2023, 11, 1), d(2024, 3, 1)).unwrap();
        let expected = 61.0 / 365.0 + 60.0 / 366.0;
        assert_relative_eq!(yf.to_f64().unwrap(), expected, epsilon = 1e-12);
    }
}
