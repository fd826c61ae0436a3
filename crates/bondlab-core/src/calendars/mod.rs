//! Holiday calendars.
//!
//! The engine never ships market holiday data. Business-day conventions
//! (BUS/252, settlement lag) take a [`HolidayCalendar`] collaborator; the
//! default [`WeekendCalendar`] only treats Saturdays and Sundays as closed.

use std::collections::BTreeSet;

use crate::types::Date;

/// Trait for holiday calendars.
pub trait HolidayCalendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a weekday holiday.
    fn is_holiday(&self, date: Date) -> bool;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday() && !self.is_holiday(date)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: u32) -> Date {
        let mut result = date;
        let mut remaining = days;

        while remaining > 0 {
            result = result.add_days(1);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

impl<T: HolidayCalendar + ?Sized> HolidayCalendar for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_holiday(&self, date: Date) -> bool {
        (**self).is_holiday(date)
    }

    fn is_business_day(&self, date: Date) -> bool {
        (**self).is_business_day(date)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl HolidayCalendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}

/// A calendar backed by an explicit list of holiday dates.
#[derive(Debug, Clone, Default)]
pub struct HolidayList {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayList {
    /// Creates a named calendar from holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns the number of holidays on the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the list carries no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendar for HolidayList {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }
}
