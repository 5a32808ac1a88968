use sift_core::Observer;

use crate::traits::{HasIterate, HasResidual};

/// Logs each solver step at `DEBUG` level under the given label.
#[derive(Debug, Clone, Copy)]
pub struct TraceObserver {
    label: &'static str,
}

impl TraceObserver {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl<E, A> Observer<E, A> for TraceObserver
where
    E: HasIterate + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        tracing::debug!(
            solver = self.label,
            iter = event.iter(),
            x = event.x(),
            residual = event.residual(),
            "solver step"
        );
        None
    }
}
