//! Property tests for day counts and period arithmetic.

use bondlab_core::daycounts::{add_period, DayCountConvention};
use bondlab_core::precision;
use bondlab_core::types::Date;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date_strategy() -> impl Strategy<Value = Date> {
    (1990i32..2060, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        Date::from_ymd(y, m, 1)
            .map(|first| first.add_days(i64::from(d.min(first.days_in_month())) - 1))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn year_fraction_is_non_negative(a in date_strategy(), b in date_strategy()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        for convention in DayCountConvention::all() {
            let yf = convention.year_fraction(start, end).unwrap();
            prop_assert!(yf >= Decimal::ZERO);
        }
    }

    #[test]
    fn actual_conventions_are_additive(
        a in date_strategy(),
        b in date_strategy(),
        c in date_strategy(),
    ) {
        let mut dates = [a, b, c];
        dates.sort();
        let [start, mid, end] = dates;
        for convention in [DayCountConvention::ActAct, DayCountConvention::Act365] {
            let whole = convention.year_fraction(start, end).unwrap();
            let parts = convention.year_fraction(start, mid).unwrap()
                + convention.year_fraction(mid, end).unwrap();
            prop_assert!(precision::approx_eq(whole, parts, dec!(0.0000000000000000001)));
        }
    }

    #[test]
    fn end_of_month_rule_pins_month_end(date in date_strategy(), months in -120i32..120) {
        let eom = date.end_of_month();
        let shifted = add_period(eom, months, true).unwrap();
        prop_assert!(shifted.is_end_of_month());

        let plain = add_period(date, months, false).unwrap();
        prop_assert!(plain.day() <= date.day());
    }

    #[test]
    fn exp_inverts_ln(value in 1u32..1_000_000u32) {
        let x = Decimal::from(value) / dec!(1000);
        let round_trip = precision::exp(precision::ln(x).unwrap()).unwrap();
        prop_assert!(precision::approx_eq(round_trip, x, x * dec!(0.000000000000000001)));
    }
}
