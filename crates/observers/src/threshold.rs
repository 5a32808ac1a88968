use sift_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// Stops the solver once `|residual|` drops below a tolerance.
///
/// Useful when the solver's own tolerances are tighter than the caller
/// needs. At least `min_iters` events are observed before stopping.
#[derive(Debug, Clone, Copy)]
pub struct ResidualThreshold {
    tolerance: f64,
    min_iters: usize,
    seen: usize,
}

impl ResidualThreshold {
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            min_iters: 0,
            seen: 0,
        }
    }

    /// Requires at least `min_iters` observed steps before stopping.
    #[must_use]
    pub fn min_iters(self, min_iters: usize) -> Self {
        Self { min_iters, ..self }
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for ResidualThreshold {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.seen += 1;
        if self.seen >= self.min_iters && event.residual().abs() < self.tolerance {
            return Some(A::stop_early());
        }
        None
    }
}
