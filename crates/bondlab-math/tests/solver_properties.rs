//! Every strategy recovers the yield of a level-coupon annuity.

use bondlab_core::precision;
use bondlab_math::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Annuity {
    coupon: Decimal,
    periods: i64,
    target: Decimal,
}

impl Annuity {
    // Deep negative yields overflow; the error lets bracket scans skip them.
    fn price(&self, y: Decimal) -> MathResult<Decimal> {
        let base = precision::add(Decimal::ONE, y)?;
        let mut pv = Decimal::ZERO;
        for t in 1..=self.periods {
            pv = precision::add(pv, precision::mul(self.coupon, precision::powi(base, -t)?)?)?;
        }
        let redemption = precision::mul(dec!(100), precision::powi(base, -self.periods)?)?;
        Ok(precision::add(pv, redemption)?)
    }
}

impl RootProblem for Annuity {
    fn value(&self, y: Decimal) -> MathResult<Decimal> {
        Ok(precision::sub(self.price(y)?, self.target)?)
    }

    fn derivative(&self, y: Decimal) -> MathResult<Decimal> {
        let base = precision::add(Decimal::ONE, y)?;
        let mut dpv = Decimal::ZERO;
        for t in 1..=self.periods {
            let weighted = precision::mul(Decimal::from(t), self.coupon)?;
            dpv = precision::sub(dpv, precision::mul(weighted, precision::powi(base, -t - 1)?)?)?;
        }
        let redemption = precision::mul(
            Decimal::from(self.periods) * dec!(100),
            precision::powi(base, -self.periods - 1)?,
        )?;
        Ok(precision::sub(dpv, redemption)?)
    }
}

#[test]
fn long_annuity_skips_overflowing_probes() {
    let mut problem = Annuity {
        coupon: dec!(14.99),
        periods: 39,
        target: Decimal::ZERO,
    };
    problem.target = problem.price(dec!(0.2499)).unwrap();

    assert!(problem.value(dec!(-0.99)).is_err());

    let result = SolverAlgorithm::SecantBisection
        .solver()
        .unwrap()
        .solve(&problem, dec!(0.05), &SolverConfig::default())
        .unwrap();
    assert!((result.root - dec!(0.2499)).abs() < dec!(0.000001));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn strategies_recover_yield(
        coupon_bp in 0u32..1500,
        yield_bp in 0u32..2500,
        periods in 1i64..40,
    ) {
        let coupon = Decimal::from(coupon_bp) / dec!(100);
        let truth = Decimal::from(yield_bp) / dec!(10000);
        let mut problem = Annuity { coupon, periods, target: Decimal::ZERO };
        problem.target = problem.price(truth).unwrap();

        let config = SolverConfig::default();
        for algorithm in [SolverAlgorithm::NewtonRaphson, SolverAlgorithm::SecantBisection] {
            let solver = algorithm.solver().unwrap();
            let result = solver.solve(&problem, dec!(0.05), &config).unwrap();
            prop_assert!((result.root - truth).abs() < dec!(0.000001));
        }
    }
}
