//! Schedule scenarios for step-up and amortizing bonds.

use bondlab_bonds::prelude::*;
use bondlab_core::types::{CashFlowKind, Date};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn step_up_coupons_jump_only_on_effective_dates() {
    let effective = [
        date(2022, 1, 15),
        date(2024, 1, 15),
        date(2026, 1, 15),
        date(2028, 1, 15),
    ];
    let terms = BondTerms::builder()
        .face_value(dec!(1000))
        .coupon_rate(dec!(0.125))
        .issue_date(date(2020, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .coupon_change(effective[0], dec!(1.0))
        .coupon_change(effective[1], dec!(2.5))
        .coupon_change(effective[2], dec!(3.75))
        .coupon_change(effective[3], dec!(5.0))
        .build()
        .unwrap();

    let flows = generate(&terms).unwrap();
    assert_eq!(flows.len(), 20);
    assert_eq!(flows[0].coupon(), dec!(0.625));
    assert_eq!(flows[19].coupon(), dec!(25));

    for pair in flows.windows(2) {
        let jumped = pair[1].coupon() != pair[0].coupon();
        assert_eq!(
            jumped,
            effective.contains(&pair[1].date()),
            "coupon on {} changed unexpectedly",
            pair[1].date()
        );
    }
}

#[test]
fn deep_discount_amortizer_schedule() {
    let mut builder = BondTerms::builder()
        .face_value(dec!(1000))
        .coupon_rate(dec!(6))
        .issue_date(date(2020, 6, 30))
        .maturity_date(date(2030, 6, 30));
    for year in 2024..2030 {
        builder = builder
            .amortization(date(year, 6, 30), dec!(8))
            .amortization(date(year, 12, 31), dec!(8));
    }
    let terms = builder.build().unwrap();

    let report = terms.validate();
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);

    let flows = generate(&terms).unwrap();
    assert_eq!(flows.len(), 20);

    let amortizing = flows
        .iter()
        .filter(|f| f.kind() == CashFlowKind::Amortization)
        .count();
    assert_eq!(amortizing, 12);

    let balloon = flows.last().unwrap();
    assert_eq!(balloon.date(), date(2030, 6, 30));
    assert_eq!(balloon.principal(), dec!(40));
    assert_eq!(balloon.coupon(), dec!(1.2));

    let principal: Decimal = flows.iter().map(|f| f.principal()).sum();
    assert_eq!(principal, dec!(1000));
    assert!(validate_schedule(&flows).is_ok());
}

#[test]
fn validation_report_lists_errors_for_broken_terms() {
    let terms = BondTerms::builder()
        .face_value(dec!(-5))
        .coupon_rate(dec!(5))
        .issue_date(date(2025, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .amortization(date(2031, 1, 15), dec!(10))
        .build()
        .unwrap();

    let report = terms.validate();
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
}
