//! # Bondlab Math
//!
//! Numerical building blocks for the Bondlab analytics engine, all in
//! `Decimal` arithmetic:
//!
//! - **Solvers**: damped Newton-Raphson, a secant/bisection hybrid, pure
//!   bisection, and a probe scan that brackets a root
//! - **Interpolation**: linear interpolation with flat extrapolation
//!
//! Objective functions are fallible (`Fn(Decimal) -> MathResult<Decimal>`)
//! so arithmetic failures inside an evaluation (an overflowing discount
//! factor, a negative radicand) reach the caller instead of being masked.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        bisection, newton_raphson, scan_bracket, secant_bisection, BisectionSolver,
        NewtonSolver, RootProblem, RootSolver, SecantBisectionSolver, SolverAlgorithm,
        SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
