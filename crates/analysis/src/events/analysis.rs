use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::{Counts, Histogram, Summary, quantile};

use super::EventLog;

/// Label used for events whose timestamp carries no UTC offset.
pub const UNKNOWN_OFFSET: &str = "unknown";

/// Tunables for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Users with more submissions than this quantile are highly active.
    pub high_quantile: f64,
    /// Users with fewer submissions than this quantile are barely active.
    pub low_quantile: f64,
    /// Number of cities kept in the top-city table.
    pub top_cities: usize,
    /// Number of bins in the submission-count histogram.
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_quantile: 0.75,
            low_quantile: 0.25,
            top_cities: 10,
            histogram_bins: 30,
        }
    }
}

/// Errors that can occur during analysis.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AnalysisError {
    #[error("quantile {0} is outside [0, 1]")]
    InvalidQuantile(f64),

    #[error("histogram needs at least one bin")]
    NoBins,
}

impl AnalysisConfig {
    /// Checks that the quantiles lie in `[0, 1]` and there is at least one bin.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for q in [self.high_quantile, self.low_quantile] {
            if !(0.0..=1.0).contains(&q) {
                return Err(AnalysisError::InvalidQuantile(q));
            }
        }
        if self.histogram_bins == 0 {
            return Err(AnalysisError::NoBins);
        }
        Ok(())
    }
}

/// Number of events recorded for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserActivity {
    pub user_id: String,
    pub submissions: usize,
}

/// A user's submission count next to their influence score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Influence {
    pub user_id: String,
    /// Events with a recorded action.
    pub total_submissions: usize,
    /// First influence value recorded for the user.
    pub total_influence: Option<f64>,
}

/// Per-user submission counts and the activity bands derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionFrequency {
    /// One entry per user, ordered by user id.
    pub per_user: Vec<UserActivity>,
    pub high_threshold: Option<f64>,
    pub low_threshold: Option<f64>,
    pub high_active: Vec<UserActivity>,
    pub low_active: Vec<UserActivity>,
    pub summary: Option<Summary>,
    pub histogram: Option<Histogram>,
}

/// Everything [`analyze`] derives from an event log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub config: AnalysisConfig,
    pub events: usize,
    pub countries: Counts,
    pub cities: Counts,
    pub top_cities: Counts,
    pub timezones: Counts,
    pub actions: Counts,
    pub submissions: SubmissionFrequency,
    /// One entry per user, ordered by user id.
    pub influence: Vec<Influence>,
}

/// Computes distributions and per-user activity for an event log.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn analyze(log: &EventLog, config: &AnalysisConfig) -> Result<Insights, AnalysisError> {
    config.validate()?;
    let events = log.events();

    let countries = Counts::from_values(
        events
            .iter()
            .map(|event| event.country.as_str())
            .filter(|country| !country.is_empty()),
    );
    let cities = Counts::from_values(
        events
            .iter()
            .map(|event| event.city.as_str())
            .filter(|city| !city.is_empty()),
    );
    let timezones = Counts::from_values(
        events
            .iter()
            .map(|event| event.utc_offset().unwrap_or_else(|| UNKNOWN_OFFSET.to_string())),
    );
    let actions = Counts::from_values(events.iter().filter_map(|event| event.action.as_deref()));

    let mut users: BTreeMap<UserKey<'_>, (usize, usize, Option<f64>)> = BTreeMap::new();
    for event in events {
        let entry = users.entry(UserKey(&event.user_id)).or_default();
        entry.0 += 1;
        if event.action.is_some() {
            entry.1 += 1;
        }
        if entry.2.is_none() {
            entry.2 = event.total_influence;
        }
    }

    let per_user: Vec<UserActivity> = users
        .iter()
        .map(|(user, &(submissions, _, _))| UserActivity {
            user_id: user.0.to_string(),
            submissions,
        })
        .collect();
    let influence = users
        .iter()
        .map(|(user, &(_, total_submissions, total_influence))| Influence {
            user_id: user.0.to_string(),
            total_submissions,
            total_influence,
        })
        .collect();

    let submissions = submission_frequency(per_user, config);
    tracing::debug!(
        events = events.len(),
        users = submissions.per_user.len(),
        "analyzed event log"
    );

    Ok(Insights {
        config: *config,
        events: events.len(),
        top_cities: cities.top(config.top_cities),
        countries,
        cities,
        timezones,
        actions,
        submissions,
        influence,
    })
}

fn submission_frequency(per_user: Vec<UserActivity>, config: &AnalysisConfig) -> SubmissionFrequency {
    #[allow(clippy::cast_precision_loss)]
    let counts: Vec<f64> = per_user.iter().map(|user| user.submissions as f64).collect();

    let high_threshold = quantile(&counts, config.high_quantile);
    let low_threshold = quantile(&counts, config.low_quantile);

    let band = |keep: &dyn Fn(f64) -> bool| -> Vec<UserActivity> {
        per_user
            .iter()
            .zip(&counts)
            .filter(|&(_, &count)| keep(count))
            .map(|(user, _)| user.clone())
            .collect()
    };
    let high_active = high_threshold.map_or_else(Vec::new, |t| band(&|count| count > t));
    let low_active = low_threshold.map_or_else(Vec::new, |t| band(&|count| count < t));

    SubmissionFrequency {
        summary: Summary::from_data(&counts),
        histogram: Histogram::new(&counts, config.histogram_bins),
        per_user,
        high_threshold,
        low_threshold,
        high_active,
        low_active,
    }
}

/// Orders user ids numerically when both are integers, textually otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UserKey<'a>(&'a str);

impl Ord for UserKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<i64>(), other.0.parse::<i64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(other.0),
        }
    }
}

impl PartialOrd for UserKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
