use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use sift_core::{DifferentiableProblem, EquationProblem, Model};

use super::{Action, Config, Error, Event, Status, solve, solve_unobserved};

/// Model that squares its input.
struct Square;

impl Model for Square {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x * x)
    }
}

/// Model that returns its input unchanged.
struct Identity;

impl Model for Identity {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(*x)
    }
}

#[derive(Debug, Error)]
#[error("negative input: {0}")]
struct NegativeInput(f64);

/// Square root model that refuses negative inputs.
struct Sqrt;

impl Model for Sqrt {
    type Input = f64;
    type Output = f64;
    type Error = NegativeInput;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x < 0.0 {
            Err(NegativeInput(*x))
        } else {
            Ok(x.sqrt())
        }
    }
}

/// Drives the model output to a target; the slope closure is the model's
/// derivative.
struct Target<F> {
    target: f64,
    slope: F,
}

impl<F: Fn(f64) -> f64> EquationProblem<1> for Target<F> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.target])
    }
}

impl<F: Fn(f64) -> f64> DifferentiableProblem for Target<F> {
    fn derivative(&self, x: f64, _input: &f64, _output: &f64) -> Result<f64, Self::Error> {
        Ok((self.slope)(x))
    }
}

fn square_target(target: f64) -> Target<impl Fn(f64) -> f64> {
    Target {
        target,
        slope: |x: f64| 2.0 * x,
    }
}

#[test]
fn finds_square_root() {
    let solution = solve_unobserved(&Square, &square_target(9.0), 10.0, &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 3.0, epsilon = 1e-12);
    assert_relative_eq!(solution.snapshot.output, 9.0, epsilon = 1e-10);
}

#[test]
fn converges_quadratically() {
    let solution = solve_unobserved(&Square, &square_target(2.0), 1.0, &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.iters <= 6, "took {} steps", solution.iters);
    assert_relative_eq!(solution.x, std::f64::consts::SQRT_2, epsilon = 1e-12);
}

#[test]
fn exact_initial_guess_needs_no_steps() {
    let solution = solve_unobserved(&Square, &square_target(16.0), 4.0, &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 4.0);
}

#[test]
fn residual_tolerance_stops_before_step_tolerance() {
    let config = Config::new(100, 0.0, 1e-3).unwrap();

    let solution =
        solve_unobserved(&Square, &square_target(9.0), 10.0, &config).expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.residual.abs() <= 1e-3);
}

#[test]
fn max_iters_returns_last_iterate() {
    let config = Config::default().with_max_iters(2);

    let solution = solve_unobserved(&Square, &square_target(9.0), 10.0, &config)
        .expect("should return last iterate");

    let x1 = 10.0 - 91.0 / 20.0;
    let x2 = x1 - (x1 * x1 - 9.0) / (2.0 * x1);

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 2);
    assert_relative_eq!(solution.x, x2, epsilon = 1e-12);
}

#[test]
fn zero_max_iters_returns_initial_guess() {
    let config = Config::default().with_max_iters(0);

    let solution = solve_unobserved(&Square, &square_target(9.0), 10.0, &config)
        .expect("should return initial guess");

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 10.0);
}

#[test]
fn observer_can_stop_iteration() {
    let mut calls = 0usize;
    let observer = |event: &Event<'_, f64, f64>| {
        calls += 1;
        if event.iter >= 3 {
            Some(Action::StopEarly)
        } else {
            None
        }
    };

    let solution = solve(
        &Square,
        &square_target(9.0),
        100.0,
        &Config::default(),
        observer,
    )
    .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 3);
    assert_eq!(calls, 3);
}

#[test]
fn events_describe_each_step() {
    let mut steps = Vec::new();
    let observer = |event: &Event<'_, f64, f64>| {
        steps.push((event.x(), event.residual(), event.derivative, event.next_x()));
        None::<Action>
    };

    solve(
        &Square,
        &square_target(9.0),
        10.0,
        &Config::default(),
        observer,
    )
    .expect("should converge");

    let (x, residual, derivative, next_x) = steps[0];
    assert_relative_eq!(x, 10.0);
    assert_relative_eq!(residual, 91.0);
    assert_relative_eq!(derivative, 20.0);
    assert_relative_eq!(next_x, 5.45);

    // Each step starts where the previous one ended.
    for pair in steps.windows(2) {
        assert_relative_eq!(pair[1].0, pair[0].3);
    }
}

#[test]
fn errors_on_zero_derivative() {
    let result = solve_unobserved(&Square, &square_target(4.0), 0.0, &Config::default());

    assert!(matches!(result, Err(Error::ZeroDerivative { x }) if x == 0.0));
}

#[test]
fn errors_on_non_finite_initial_guess() {
    let result = solve_unobserved(&Square, &square_target(4.0), f64::NAN, &Config::default());
    assert!(matches!(result, Err(Error::NonFiniteInitialGuess { .. })));

    let result = solve_unobserved(
        &Square,
        &square_target(4.0),
        f64::NEG_INFINITY,
        &Config::default(),
    );
    assert!(matches!(result, Err(Error::NonFiniteInitialGuess { .. })));
}

#[test]
fn errors_on_overflowing_step() {
    let problem = Target {
        target: -1e10,
        slope: |_: f64| f64::MIN_POSITIVE,
    };

    let result = solve_unobserved(&Identity, &problem, 0.0, &Config::default());

    assert!(matches!(result, Err(Error::NonFiniteIterate { from }) if from == 0.0));
}

#[test]
fn errors_on_non_finite_derivative() {
    let problem = Target {
        target: 1.0,
        slope: |_: f64| f64::NAN,
    };

    let result = solve_unobserved(&Identity, &problem, 0.0, &Config::default());

    assert!(matches!(result, Err(Error::NonFiniteDerivative { .. })));
}

#[test]
fn propagates_model_errors() {
    // sqrt(x) = 3 from x0 = -1 fails on the first model call.
    let problem = Target {
        target: 3.0,
        slope: |x: f64| 0.5 / x.sqrt(),
    };

    let result = solve_unobserved(&Sqrt, &problem, -1.0, &Config::default());

    assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn repeated_solves_are_identical() {
    let first = solve_unobserved(&Square, &square_target(7.0), 3.0, &Config::default()).unwrap();
    let second = solve_unobserved(&Square, &square_target(7.0), 3.0, &Config::default()).unwrap();

    assert_eq!(first.x.to_bits(), second.x.to_bits());
    assert_eq!(first.iters, second.iters);
}
