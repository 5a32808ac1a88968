//! Solvers for equation problems: finding roots of equations.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to model inputs,
//! calls the model, and computes residuals. Solvers in this module drive those
//! residuals toward zero.
//!
//! # Solvers
//!
//! - [`newton`]: Newton-Raphson iteration for [`DifferentiableProblem`]s
//!
//! [`EquationProblem`]: sift_core::EquationProblem
//! [`DifferentiableProblem`]: sift_core::DifferentiableProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod newton;
