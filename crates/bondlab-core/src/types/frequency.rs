//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Payment frequency for coupon bonds.
///
/// Only frequencies whose period is a whole number of months are
/// representable, since schedules step by `12 / periods_per_year` months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Every four months (3 per year)
    TriAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Every two months (6 per year)
    BiMonthly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Builds a frequency from a periods-per-year count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` unless `periods` is one of 1, 2, 3, 4, 6, 12.
    pub fn from_periods(periods: u32) -> CoreResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            3 => Ok(Frequency::TriAnnual),
            4 => Ok(Frequency::Quarterly),
            6 => Ok(Frequency::BiMonthly),
            12 => Ok(Frequency::Monthly),
            other => Err(CoreError::parse("frequency", other.to_string())),
        }
    }

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::TriAnnual => 3,
            Frequency::Quarterly => 4,
            Frequency::BiMonthly => 6,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::TriAnnual => "Tri-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiMonthly => "Bi-Monthly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_and_months() {
        for periods in [1, 2, 3, 4, 6, 12] {
            let freq = Frequency::from_periods(periods).unwrap();
            assert_eq!(freq.periods_per_year(), periods);
            assert_eq!(freq.months_per_period() * periods, 12);
        }
    }

    #[test]
    fn test_rejects_uneven_periods() {
        assert!(Frequency::from_periods(0).is_err());
        assert!(Frequency::from_periods(5).is_err());
        assert!(Frequency::from_periods(24).is_err());
    }
}
