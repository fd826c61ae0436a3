//! End-to-end analysis scenarios.

use approx::assert_relative_eq;
use bondlab_analytics::prelude::*;
use bondlab_bonds::BondTerms;
use bondlab_core::precision;
use bondlab_core::types::{CashFlowKind, Date, SpreadType};
use bondlab_curves::{BenchmarkCurve, CurvePoint, StaticCurveProvider};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn curve_points() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(dec!(0.0833), dec!(5.30)),
        CurvePoint::new(dec!(0.25), dec!(5.25)),
        CurvePoint::new(dec!(0.5), dec!(5.10)),
        CurvePoint::new(dec!(1), dec!(4.80)),
        CurvePoint::new(dec!(2), dec!(4.40)),
        CurvePoint::new(dec!(5), dec!(4.10)),
        CurvePoint::new(dec!(10), dec!(4.20)),
        CurvePoint::new(dec!(30), dec!(4.45)),
    ]
}

fn vanilla() -> BondTerms {
    BondTerms::builder()
        .id("VANILLA-5Y")
        .face_value(dec!(1000))
        .coupon_rate(dec!(5))
        .issue_date(date(2025, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .build()
        .unwrap()
}

fn deep_discount_amortizer() -> BondTerms {
    let mut builder = BondTerms::builder()
        .id("AMORT-2030")
        .face_value(dec!(1000))
        .coupon_rate(dec!(6))
        .issue_date(date(2020, 6, 30))
        .maturity_date(date(2030, 6, 30));
    for year in 2024..2030 {
        builder = builder
            .amortization(date(year, 6, 30), dec!(8))
            .amortization(date(year, 12, 31), dec!(8));
    }
    builder.build().unwrap()
}

#[test]
fn vanilla_bond_at_par_on_coupon_date() {
    let result = analyze(
        &vanilla(),
        date(2025, 1, 15),
        &MarketQuote::price(dec!(100)),
        None,
    )
    .unwrap();

    assert_relative_eq!(precision::to_display_f64(result.yields.ytm), 0.05, epsilon = 1e-8);
    assert_eq!(result.prices.accrued_amount, Decimal::ZERO);
    assert_eq!(result.outstanding_notional, dec!(1000));

    let modified = precision::to_display_f64(result.risk.modified_duration);
    assert_relative_eq!(modified, 4.376, epsilon = 0.01);
    assert!(result.risk.modified_duration < dec!(5));
    assert!(result.risk.modified_duration < result.risk.macaulay_duration);
    assert_relative_eq!(
        precision::to_display_f64(result.risk.effective_duration),
        modified,
        epsilon = 1e-4
    );

    // 4.376 × 1000 / 10000
    assert_relative_eq!(precision::to_display_f64(result.risk.dv01), 0.4376, epsilon = 0.001);
    assert_eq!(result.risk.average_life, dec!(5));
    assert_relative_eq!(precision::to_display_f64(result.yields.current_yield), 0.05, epsilon = 1e-9);
    assert_eq!(result.yields.ytw, result.yields.ytm);
    assert_eq!(result.yields.ytw_kind, CashFlowKind::Maturity);
}

#[test]
fn deep_discount_amortizer_converges() {
    let terms = deep_discount_amortizer();
    let settlement = date(2025, 3, 14);
    let result = analyze(&terms, settlement, &MarketQuote::price(dec!(69.78)), None).unwrap();

    // 1000 less the 2024 amortizations
    assert_eq!(result.outstanding_notional, dec!(840));
    assert!(result.yields.ytm > Decimal::ZERO);
    assert!(result.diagnostics.attempts.last().unwrap().succeeded());
    assert!(result.risk.average_life < dec!(5.3));
    assert!(result.risk.convexity > Decimal::ZERO);

    let clean = result.prices.clean_pct;
    assert!((clean - dec!(69.78)).abs() < dec!(0.0000001));
}

#[test]
fn step_up_coupon_bond() {
    let terms = BondTerms::builder()
        .face_value(dec!(1000))
        .coupon_rate(dec!(0.125))
        .issue_date(date(2020, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .coupon_change(date(2022, 1, 15), dec!(1.0))
        .coupon_change(date(2024, 1, 15), dec!(2.5))
        .coupon_change(date(2026, 1, 15), dec!(3.75))
        .coupon_change(date(2028, 1, 15), dec!(5.0))
        .build()
        .unwrap();

    let result = analyze(&terms, date(2025, 1, 15), &MarketQuote::price(dec!(95)), None).unwrap();

    // Next twelve months pay 2.5% then 3.75% for one half year each
    let expected_income = dec!(12.5) + dec!(18.75);
    assert_eq!(
        result.yields.current_yield,
        expected_income / result.prices.clean_amount
    );
    assert!(result.yields.ytm > dec!(0.03));

    let changes: Vec<Date> = result
        .cash_flows
        .windows(2)
        .filter(|pair| pair[0].coupon() != pair[1].coupon())
        .map(|pair| pair[1].date())
        .collect();
    assert_eq!(
        changes,
        vec![
            date(2022, 1, 15),
            date(2024, 1, 15),
            date(2026, 1, 15),
            date(2028, 1, 15)
        ]
    );
}

#[test]
fn no_curve_means_no_spreads() {
    let result = analyze(
        &vanilla(),
        date(2025, 6, 2),
        &MarketQuote::price(dec!(99.10)),
        None,
    )
    .unwrap();
    assert!(result.spreads.is_none());
    assert!(result.yields.ytm > Decimal::ZERO);
    assert!(result.risk.dv01 > Decimal::ZERO);

    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("spreads").is_none());
}

#[test]
fn spreads_against_benchmark_curve() {
    let curve = BenchmarkCurve::new(curve_points()).unwrap();
    let result = analyze(
        &vanilla(),
        date(2025, 1, 15),
        &MarketQuote::price(dec!(100)),
        Some(&curve),
    )
    .unwrap();

    let spreads = result.spreads.unwrap();
    // Average life 5y sits on the 4.10% knot
    assert_eq!(spreads.benchmark_yield_pct, dec!(4.10));
    assert_eq!(spreads.nominal.spread_type(), SpreadType::Nominal);
    assert_relative_eq!(
        precision::to_display_f64(spreads.nominal.as_bps()),
        90.0,
        epsilon = 1e-4
    );

    let z = spreads.z_spread.bps().unwrap();
    assert!(z > dec!(50) && z < dec!(150));
}

#[test]
fn provider_supplies_curve_as_of_settlement() {
    let provider = StaticCurveProvider::new(curve_points());
    let result = AnalyticsEngine::default()
        .analyze_with_provider(
            &vanilla(),
            date(2025, 1, 15),
            &MarketQuote::price(dec!(100)),
            &provider,
        )
        .unwrap();
    assert!(result.spreads.is_some());
}

#[test]
fn callable_premium_bond_yield_to_worst() {
    let terms = BondTerms::builder()
        .face_value(dec!(100))
        .coupon_rate(dec!(7))
        .issue_date(date(2024, 3, 1))
        .maturity_date(date(2034, 3, 1))
        .call(date(2027, 3, 1), dec!(102))
        .call(date(2029, 3, 1), dec!(100))
        .build()
        .unwrap();

    let result = analyze(&terms, date(2025, 3, 3), &MarketQuote::price(dec!(108)), None).unwrap();
    assert_eq!(result.yields.exercises.len(), 2);
    assert!(result.yields.ytw < result.yields.ytm);
    assert_eq!(result.yields.ytw_kind, CashFlowKind::Call);
}

#[test]
fn settlement_after_final_payment() {
    let err = analyze(
        &vanilla(),
        date(2030, 1, 15),
        &MarketQuote::price(dec!(100)),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, AnalyticsError::NoFutureCashFlows { .. }));
}

#[test]
fn supplied_yield_outside_window() {
    let err = analyze(
        &vanilla(),
        date(2025, 1, 15),
        &MarketQuote::yield_rate(dec!(0.65)),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, AnalyticsError::UnrealisticYield { .. }));
}

#[test]
fn invalid_terms_are_rejected_before_analysis() {
    let terms = BondTerms::builder()
        .face_value(dec!(1000))
        .coupon_rate(dec!(75))
        .issue_date(date(2025, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .build()
        .unwrap();
    let err = analyze(&terms, date(2025, 1, 15), &MarketQuote::price(dec!(100)), None).unwrap_err();
    let AnalyticsError::InvalidBondTerms { errors } = err else {
        panic!("expected InvalidBondTerms, got {err:?}");
    };
    assert_eq!(errors.len(), 1);
}

#[test]
fn amortization_overflow_is_invalid_schedule() {
    let terms = BondTerms::builder()
        .face_value(dec!(1000))
        .coupon_rate(dec!(5))
        .issue_date(date(2025, 1, 15))
        .maturity_date(date(2030, 1, 15))
        .amortization(date(2027, 1, 15), dec!(60))
        .amortization(date(2028, 1, 15), dec!(60))
        .build()
        .unwrap();

    let engine = AnalyticsEngine::default();
    assert!(!engine.validate(&terms).valid);
    let err = engine
        .analyze(&terms, date(2025, 1, 15), &MarketQuote::price(dec!(100)), None)
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidSchedule(_)));
}

#[test]
fn outstanding_notional_override() {
    let terms = deep_discount_amortizer();
    let settlement = date(2025, 3, 14);
    let derived = analyze(&terms, settlement, &MarketQuote::price(dec!(69.78)), None).unwrap();
    let overridden = analyze(
        &terms,
        settlement,
        &MarketQuote::price(dec!(69.78)).with_outstanding_notional(dec!(1000)),
        None,
    )
    .unwrap();

    assert_eq!(overridden.outstanding_notional, dec!(1000));
    // A larger notional at the same percentage is a higher price, so a lower yield
    assert!(overridden.yields.ytm < derived.yields.ytm);
}
