//! Business/252 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::calendars::{HolidayCalendar, WeekendCalendar};
use crate::types::Date;

/// Business/252 day count convention.
///
/// Counts business days in `(start, end]` under the injected calendar and
/// divides by 252. The default calendar closes weekends only.
#[derive(Debug, Clone, Default)]
pub struct Bus252<C: HolidayCalendar = WeekendCalendar> {
    calendar: C,
}

impl Bus252<WeekendCalendar> {
    /// Creates the convention over the weekend-only calendar.
    #[must_use]
    pub fn weekend() -> Self {
        Self {
            calendar: WeekendCalendar,
        }
    }
}

impl<C: HolidayCalendar> Bus252<C> {
    /// Creates the convention over a holiday calendar.
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }
}

impl<C: HolidayCalendar> DayCount for Bus252<C> {
    fn name(&self) -> &str {
        "BUS/252"
    }

    fn unchecked_year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(252)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.business_days_between(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::HolidayList;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weekends_excluded() {
        // Mon 2025-01-06 -> Mon 2025-01-13: 5 business days
        let start = Date::from_ymd(2025, 1, 6).unwrap();
        let end = Date::from_ymd(2025, 1, 13).unwrap();
        let dc = Bus252::weekend();

        assert_eq!(dc.day_count(start, end), 5);
        assert_eq!(dc.year_fraction(start, end).unwrap(), dec!(5) / dec!(252));
    }

    #[test]
    fn test_injected_holidays() {
        let start = Date::from_ymd(2025, 1, 6).unwrap();
        let end = Date::from_ymd(2025, 1, 13).unwrap();
        let holiday = Date::from_ymd(2025, 1, 8).unwrap();
        let dc = Bus252::with_calendar(HolidayList::new("Test", [holiday]));

        assert_eq!(dc.day_count(start, end), 4);
    }

    #[test]
    fn test_borrowed_calendar() {
        let start = Date::from_ymd(2025, 1, 6).unwrap();
        let end = Date::from_ymd(2025, 1, 13).unwrap();
        let calendar = HolidayList::new("Test", [Date::from_ymd(2025, 1, 10).unwrap()]);
        let dynamic: &dyn HolidayCalendar = &calendar;

        assert_eq!(Bus252::with_calendar(dynamic).day_count(start, end), 4);
    }
}
