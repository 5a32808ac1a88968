//! Reusable observers for the sift solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solver event types.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasIterate`], [`CanStopEarly`])
//! - [`Recorder`]: keeps every step for later inspection or plotting
//! - [`ResidualThreshold`]: stops once the residual is small enough
//! - [`TraceObserver`]: logs each step through `tracing`
//!
//! [`Observer`]: sift_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasIterate`]: traits::HasIterate
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod record;
mod threshold;
mod trace;

pub use record::{Recorder, Step};
pub use threshold::ResidualThreshold;
pub use trace::TraceObserver;
