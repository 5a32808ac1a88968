use crate::equation::Evaluation;

/// Iteration event emitted by the Newton solver.
///
/// Emitted once per step, after the derivative is known and before the next
/// iterate is evaluated.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Evaluation at the current iterate.
    pub eval: &'a Evaluation<I, O, 1>,
    /// Residual slope at the current iterate.
    pub derivative: f64,
    /// Newton step `residual / derivative`, subtracted from `x`.
    pub step: f64,
}

impl<I, O> Event<'_, I, O> {
    /// Returns the current iterate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.eval.x()
    }

    /// Returns the residual at the current iterate.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.eval.residual()
    }

    /// Returns the iterate the solver will move to next.
    #[must_use]
    pub fn next_x(&self) -> f64 {
        self.x() - self.step
    }
}
