//! Day count conventions for fixed income calculations.
//!
//! Day count conventions turn a date pair into a year fraction, used both
//! for accrued interest and for the discounting time of each cash flow.
//!
//! # Supported Conventions
//!
//! - [`Thirty360`]: 30/360 bond basis (31 clamped to 30, with cascade)
//! - [`Thirty360E`]: 30E/360 (both ends clamped independently)
//! - [`ActAct`]: Actual/Actual, split at calendar-year boundaries
//! - [`Act360`]: Actual/360
//! - [`Act365`]: Actual/365 Fixed
//! - [`Bus252`]: Business days over 252, with an injected holiday calendar
//!
//! # Usage
//!
//! ```rust
//! use bondlab_core::daycounts::{DayCount, Thirty360};
//! use bondlab_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(Thirty360.day_count(start, end), 180);
//! let yf = Thirty360.year_fraction(start, end).unwrap();
//! ```

mod act360;
mod act365;
mod actact;
mod bus252;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365;
pub use actact::ActAct;
pub use bus252::Bus252;
pub use thirty360::{Thirty360, Thirty360E};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendars::HolidayCalendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementors supply the raw fraction; callers go through
/// [`DayCount::year_fraction`], which rejects reversed date pairs.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &str;

    /// Year fraction without the ordering check.
    fn unchecked_year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Calculates the year fraction between two dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DayCount` when `start > end`.
    fn year_fraction(&self, start: Date, end: Date) -> CoreResult<Decimal> {
        if start > end {
            return Err(CoreError::day_count(format!(
                "{}: start {start} is after end {end}",
                self.name()
            )));
        }
        Ok(self.unchecked_year_fraction(start, end))
    }
}

/// Enumeration of the supported day count conventions.
///
/// Bond terms carry this enum; it dispatches to the unit-struct
/// implementations without boxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// 30/360 bond basis
    #[default]
    #[serde(rename = "30/360", alias = "Thirty360")]
    Thirty360,
    /// 30E/360 Eurobond basis
    #[serde(rename = "30E/360", alias = "Thirty360E")]
    Thirty360E,
    /// Actual/Actual
    #[serde(rename = "ACT/ACT", alias = "ActAct")]
    ActAct,
    /// Actual/360
    #[serde(rename = "ACT/360", alias = "Act360")]
    Act360,
    /// Actual/365 Fixed
    #[serde(rename = "ACT/365", alias = "Act365")]
    Act365,
    /// Business/252; weekend-only unless a calendar is supplied
    #[serde(rename = "BUS/252", alias = "Bus252")]
    Bus252,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360 => Box::new(Thirty360),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
            DayCountConvention::ActAct => Box::new(ActAct),
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365 => Box::new(Act365),
            DayCountConvention::Bus252 => Box::new(Bus252::weekend()),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::ActAct => "ACT/ACT",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
            DayCountConvention::Bus252 => "BUS/252",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360,
            DayCountConvention::Thirty360E,
            DayCountConvention::ActAct,
            DayCountConvention::Act360,
            DayCountConvention::Act365,
            DayCountConvention::Bus252,
        ]
    }

    /// Year fraction between two dates under this convention.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DayCount` when `start > end`.
    pub fn year_fraction(&self, start: Date, end: Date) -> CoreResult<Decimal> {
        match self {
            DayCountConvention::Thirty360 => Thirty360.year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
            DayCountConvention::ActAct => ActAct.year_fraction(start, end),
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365 => Act365.year_fraction(start, end),
            DayCountConvention::Bus252 => Bus252::weekend().year_fraction(start, end),
        }
    }

    /// Year fraction with business days counted on `calendar`.
    ///
    /// Only BUS/252 consults the calendar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DayCount` when `start > end`.
    pub fn year_fraction_with(
        &self,
        start: Date,
        end: Date,
        calendar: &dyn HolidayCalendar,
    ) -> CoreResult<Decimal> {
        match self {
            DayCountConvention::Bus252 => Bus252::with_calendar(calendar).year_fraction(start, end),
            other => other.year_fraction(start, end),
        }
    }

    /// Day count between two dates under this convention.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Thirty360 => Thirty360.day_count(start, end),
            DayCountConvention::Thirty360E => Thirty360E.day_count(start, end),
            DayCountConvention::ActAct => ActAct.day_count(start, end),
            DayCountConvention::Act360 => Act360.day_count(start, end),
            DayCountConvention::Act365 => Act365.day_count(start, end),
            DayCountConvention::Bus252 => Bus252::weekend().day_count(start, end),
        }
    }

    /// Day count with business days counted on `calendar`.
    #[must_use]
    pub fn day_count_with(&self, start: Date, end: Date, calendar: &dyn HolidayCalendar) -> i64 {
        match self {
            DayCountConvention::Bus252 => Bus252::with_calendar(calendar).day_count(start, end),
            other => other.day_count(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses market names ("30/360", "ACT/ACT") and common aliases
    /// ("BOND", "EUROBOND", "ACTUAL/360").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "30/360" | "30/360 US" | "30U/360" | "BOND" | "BOND BASIS" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360)
            }
            "30E/360" | "30/360 ICMA" | "EUROBOND" | "THIRTY360E" => {
                Ok(DayCountConvention::Thirty360E)
            }
            "ACT/ACT" | "ACTUAL/ACTUAL" | "ACT/ACT ISDA" | "ACTACT" => {
                Ok(DayCountConvention::ActAct)
            }
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACTUAL/365" | "ACT/365 FIXED" | "ACT365" => {
                Ok(DayCountConvention::Act365)
            }
            "BUS/252" | "BUSINESS/252" | "BUS252" => Ok(DayCountConvention::Bus252),
            _ => Err(CoreError::parse("day count convention", s)),
        }
    }
}

/// Adds `months` to `date`, honoring the end-of-month rule.
///
/// With `end_of_month_rule` set, a date on the last day of its month maps to
/// the last day of the target month. Otherwise the day of month is kept and
/// clamped down when the target month is shorter.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the result is out of range.
pub fn add_period(date: Date, months: i32, end_of_month_rule: bool) -> CoreResult<Date> {
    date.add_months_eom(months, end_of_month_rule)
}
