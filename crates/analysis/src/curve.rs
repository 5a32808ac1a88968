//! Analysis of ordered `(x, y)` samples.
//!
//! All functions here take samples sorted ascending by strictly increasing
//! `x`. The slice functions ([`scan`], [`zero_crossings`], [`slope`], ...)
//! assume that ordering; [`Curve`] checks it once up front.
//!
//! Zero crossings are located by linear interpolation between the two samples
//! whose `y` signs differ:
//!
//! ```text
//! x_zero = x_i - y_i * (x_{i+1} - x_i) / (y_{i+1} - y_i)
//! ```
//!
//! Signs are three-valued, so a sample exactly at `y = 0` ends one crossing
//! interval and starts the next; both report `x_zero = x` of that sample.

mod error;
mod sample;
mod scan;
mod slope;
mod table;

pub use error::CurveError;
pub use sample::{Curve, Sample};
pub use scan::{CurveScan, Extremum, ZeroCrossing, ZeroCrossings, max, min, scan, zero_crossings};
pub use slope::{StationaryKind, StationaryPoint, slope, stationary_points};
pub use table::{TableError, read_samples};
