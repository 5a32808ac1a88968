use serde::Serialize;
use sift_core::Observer;

use crate::traits::{HasIterate, HasResidual};

/// One recorded solver step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub iter: usize,
    pub x: f64,
    pub residual: f64,
}

/// Records every observed step without steering the solver.
///
/// The recorded history is the convergence trace a caller would chart.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the steps seen so far, in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl<E, A> Observer<E, A> for Recorder
where
    E: HasIterate + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.steps.push(Step {
            iter: event.iter(),
            x: event.x(),
            residual: event.residual(),
        });
        None
    }
}

/// Lets a solver borrow the recorder so the caller keeps the history.
impl<E, A> Observer<E, A> for &mut Recorder
where
    E: HasIterate + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        <Recorder as Observer<E, A>>::observe(self, event)
    }
}
