//! Summaries of a CSV log of user events.
//!
//! The log has one row per event with at least `user_id`, `event_time`,
//! `location` (`"City, State"`), `country`, `event_action`, and
//! `total_influence`. Other columns are ignored.
//!
//! [`EventLog::load`] reads the file, [`analyze`] computes the distributions
//! and per-user activity, and [`Report`] arranges them into numbered sections.

mod analysis;
mod load;
mod record;
mod report;

pub use analysis::{
    AnalysisConfig, AnalysisError, Influence, Insights, SubmissionFrequency, UserActivity,
    analyze,
};
pub use load::{EventLog, LoadError};
pub use record::{Event, Timestamp, parse_timestamp};
pub use report::{Body, Report, Section};
