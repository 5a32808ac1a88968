//! Real cube roots via Newton's method.
//!
//! The root of `f(x) = x³ - n` is found with the update
//! `x' = x - (x³ - n) / (3x²)`, starting from `x₀ = n`.
//!
//! `n = 0` is exact at the initial guess, so the solver reports convergence
//! before the first step and never evaluates `3x² = 0` as a divisor.
//!
//! The step tolerance is absolute, so roots much smaller than it come back
//! with an absolute error of about the tolerance: with the default `1e-7`,
//! `newton_cbrt(1e-100)` stops near `1.5e-7`. Outside roughly
//! `1e-103 < |n| < 1e102` the first iterates overflow or underflow and
//! the solve fails with a non-finite residual or a zero derivative.

use std::convert::Infallible;

use thiserror::Error;

use sift_core::{DifferentiableProblem, EquationProblem, Model, Observer};

use crate::equation::newton::{self, Action, Config, Event, Solution};

/// Errors that can occur when computing a cube root.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot take the cube root of {value}")]
    InvalidInput { value: f64 },

    #[error(transparent)]
    Solver(#[from] newton::Error),
}

/// Model that cubes its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cube;

impl Model for Cube {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x * x * x)
    }
}

/// Equation problem `x³ - target = 0` for the [`Cube`] model.
#[derive(Debug, Clone, Copy)]
pub struct CubeRoot {
    target: f64,
}

impl CubeRoot {
    /// Creates the problem for a finite target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `target` is NaN or infinite.
    pub fn new(target: f64) -> Result<Self, Error> {
        if target.is_finite() {
            Ok(Self { target })
        } else {
            Err(Error::InvalidInput { value: target })
        }
    }

    /// Returns the value whose cube root is sought.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl EquationProblem<1> for CubeRoot {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.target])
    }
}

impl DifferentiableProblem for CubeRoot {
    fn derivative(&self, x: f64, _input: &f64, _output: &f64) -> Result<f64, Self::Error> {
        Ok(3.0 * x * x)
    }
}

/// Solves for the cube root of `n`, reporting every step to `observer`.
///
/// # Errors
///
/// Returns an error if `n` is not finite or the iteration degenerates.
pub fn solve<Obs>(n: f64, config: &Config, observer: Obs) -> Result<Solution<f64, f64>, Error>
where
    Obs: for<'a> Observer<Event<'a, f64, f64>, Action>,
{
    let problem = CubeRoot::new(n)?;
    Ok(newton::solve(&Cube, &problem, n, config, observer)?)
}

/// Returns the real cube root of `n`.
///
/// If the iteration cap is reached first, the last iterate is returned as a
/// best-effort estimate; use [`solve`] to inspect the [`newton::Status`].
///
/// # Errors
///
/// Returns an error if `n` is not finite or the iteration degenerates.
pub fn newton_cbrt(n: f64, config: &Config) -> Result<f64, Error> {
    solve(n, config, ()).map(|solution| solution.x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::equation::newton::Status;

    #[test]
    fn perfect_cubes() {
        let config = Config::default();

        assert_relative_eq!(newton_cbrt(8.0, &config).unwrap(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(newton_cbrt(27.0, &config).unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(newton_cbrt(-8.0, &config).unwrap(), -2.0, epsilon = 1e-9);
        assert_relative_eq!(newton_cbrt(1.0, &config).unwrap(), 1.0);
    }

    #[test]
    fn cube_of_root_recovers_input() {
        let config = Config::default();

        for n in [0.001, 0.5, 2.0, 10.0, 123.456, 1e6, 1e12] {
            let root = newton_cbrt(n, &config).unwrap();
            assert!(root > 0.0);
            assert_relative_eq!(root.powi(3), n, max_relative = 1e-9);

            let negative = newton_cbrt(-n, &config).unwrap();
            assert!(negative < 0.0);
            assert_relative_eq!(negative, -root, max_relative = 1e-12);
        }
    }

    #[test]
    fn agrees_with_std() {
        let config = Config::default();

        for n in [3.0, 64.0, 1000.0, -0.125, 7.7] {
            let root = newton_cbrt(n, &config).unwrap();
            assert_relative_eq!(root, f64::cbrt(n), max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_is_exact_without_iterating() {
        let solution = solve(0.0, &Config::default(), ()).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_eq!(solution.x, 0.0);
    }

    #[test]
    fn rejects_non_finite_input() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = newton_cbrt(n, &Config::default());
            assert!(matches!(result, Err(Error::InvalidInput { .. })));
        }
    }

    #[test]
    fn iteration_cap_returns_best_effort() {
        let config = Config::default().with_max_iters(3);

        let solution = solve(1000.0, &config, ()).unwrap();

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 3);
        assert!(solution.x > 10.0 && solution.x < 1000.0);
    }

    #[test]
    fn tiny_roots_are_accurate_to_the_step_tolerance() {
        let solution = solve(1e-100, &Config::default(), ()).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.x > 0.0 && solution.x < 1e-6);
    }

    #[test]
    fn huge_inputs_overflow() {
        let result = newton_cbrt(1e150, &Config::default());
        assert!(matches!(
            result,
            Err(Error::Solver(newton::Error::NonFiniteResidual { .. }))
        ));
    }

    #[test]
    fn repeated_calls_agree() {
        let config = Config::default();

        let first = newton_cbrt(42.0, &config).unwrap();
        let second = newton_cbrt(42.0, &config).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
    }
}
