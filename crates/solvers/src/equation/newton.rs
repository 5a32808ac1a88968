//! Newton-Raphson solver for scalar equation problems.
//!
//! Starting from an initial guess, each step moves along the tangent of the
//! residual:
//!
//! ```text
//! x_{k+1} = x_k - r(x_k) / r'(x_k)
//! ```
//!
//! The problem supplies `r'` through [`DifferentiableProblem::derivative`].
//!
//! # Example
//!
//! ```ignore
//! use sift_solvers::equation::newton;
//!
//! let solution = newton::solve_unobserved(&model, &problem, 1.0, &newton::Config::default())?;
//! println!("root: {} after {} steps", solution.x, solution.iters);
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use sift_core::{DifferentiableProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

/// Finds a root of the equation using Newton's method.
///
/// # Algorithm
///
/// 1. Evaluate the residual at the initial guess.
/// 2. For each step:
///    - If `|residual| <= residual_tol`, report convergence at the current `x`.
///    - Compute the derivative; a zero or non-finite slope is an error.
///    - Emit an [`Event`]; the observer may return [`Action::StopEarly`].
///    - Evaluate the next iterate `x - residual / derivative`.
///    - If the step was shorter than `step_tol`, report convergence at the
///      next iterate.
/// 3. After `max_iters` steps, return the last iterate with
///    [`Status::MaxIters`].
///
/// # Errors
///
/// Returns an error if the initial guess is not finite, a residual,
/// derivative, or iterate becomes degenerate, or the model or problem
/// returns an error during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: DifferentiableProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    if !x0.is_finite() {
        return Err(Error::NonFiniteInitialGuess { x: x0 });
    }

    let mut current = evaluate(model, problem, [x0])?;

    for iter in 1..=config.max_iters() {
        let x = current.x();
        let residual = checked_residual(&current)?;

        if residual.abs() <= config.residual_tol() {
            return Ok(Solution::from_eval(current, Status::Converged, iter - 1));
        }

        let derivative = problem
            .derivative(x, &current.snapshot.input, &current.snapshot.output)
            .map_err(Error::problem)?;
        if !derivative.is_finite() {
            return Err(Error::NonFiniteDerivative { x, derivative });
        }
        #[allow(clippy::float_cmp)]
        if derivative == 0.0 {
            return Err(Error::ZeroDerivative { x });
        }

        let step = residual / derivative;
        let next_x = x - step;
        if !next_x.is_finite() {
            return Err(Error::NonFiniteIterate { from: x });
        }

        let event = Event {
            iter,
            eval: &current,
            derivative,
            step,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::from_eval(
                current,
                Status::StoppedByObserver,
                iter,
            ));
        }

        let next = evaluate(model, problem, [next_x])?;

        if step.abs() < config.step_tol() {
            return Ok(Solution::from_eval(next, Status::Converged, iter));
        }

        current = next;
    }

    checked_residual(&current)?;
    Ok(Solution::from_eval(
        current,
        Status::MaxIters,
        config.max_iters(),
    ))
}

/// Runs Newton's method without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    x0: f64,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: DifferentiableProblem<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, x0, config, ())
}

fn checked_residual<I, O>(eval: &Evaluation<I, O, 1>) -> Result<f64, Error> {
    let residual = eval.residual();
    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(Error::NonFiniteResidual {
            x: eval.x(),
            residual,
        })
    }
}
