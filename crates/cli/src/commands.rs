//! Subcommand implementations.
//!
//! Each command writes its result to the given writer so tests can capture
//! it; diagnostics go through `tracing`.

mod cbrt;
mod events;
mod scan;

pub use cbrt::{CbrtArgs, run as cbrt};
pub use events::{EventsArgs, run as events};
pub use scan::{ScanArgs, run as scan};

type CommandResult = Result<(), Box<dyn std::error::Error>>;
