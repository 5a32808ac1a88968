//! Numerical solvers built on the `sift-core` traits.
//!
//! - [`equation::newton`]: Newton-Raphson for scalar equation problems
//! - [`cbrt`]: real cube roots via Newton's method

pub mod cbrt;
pub mod equation;

pub use cbrt::newton_cbrt;
