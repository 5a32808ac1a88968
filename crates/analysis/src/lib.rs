//! Data-analysis procedures for sift.
//!
//! - [`curve`]: extrema, zero crossings, and slope analysis of ordered samples
//! - [`stats`]: quantiles, descriptive summaries, histograms, value counts
//! - [`events`]: loading and summarizing a CSV log of user events

pub mod curve;
pub mod events;
pub mod stats;
