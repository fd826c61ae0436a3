//! Yield calculations.
//!
//! - **Yield-to-maturity**: [`YieldSolver`] finds the flat yield equating
//!   present value to a dirty price, falling back through Newton-Raphson,
//!   a bracketed secant/bisection hybrid and bisection.
//! - **Current yield**: next twelve months of coupons over the clean price.
//! - **Yield-to-worst**: minimum of YTM and the yield to every call and put.

mod current;
mod solver;
mod workout;

pub use current::current_yield;
pub use solver::{solve_yield, YieldSolution, YieldSolver};
pub use workout::{
    exercise_schedule, yield_to_worst, ExerciseOutcome, ExerciseYield, WorstYield,
};
