use std::fmt;

use serde::Serialize;

use crate::stats::{Counts, Histogram, Summary};

use super::{Influence, Insights};

/// A numbered, sectioned summary of [`Insights`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

/// One numbered report section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Dotted number such as `"2.1"`.
    pub number: String,
    pub title: String,
    pub body: Body,
}

/// The content of a report section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Body {
    /// A chapter heading with no content of its own.
    Heading,
    Text(String),
    Counts {
        /// Header for the value column.
        label: String,
        counts: Counts,
    },
    Submissions {
        summary: Option<Summary>,
        histogram: Option<Histogram>,
    },
    Influence(Vec<Influence>),
}

impl Report {
    /// Arranges insights into demographic, collaboration, and additional
    /// chapters.
    #[must_use]
    pub fn new(insights: &Insights) -> Self {
        let submissions = &insights.submissions;
        let high_share = (1.0 - insights.config.high_quantile) * 100.0;
        let low_share = insights.config.low_quantile * 100.0;

        let counts = |label: &str, counts: &Counts| Body::Counts {
            label: label.to_string(),
            counts: counts.clone(),
        };

        let sections = vec![
            section("1", "Demographic Analysis", Body::Heading),
            section(
                "1.1",
                "Country and Region Distribution",
                counts("Country", &insights.countries),
            ),
            section(
                "1.2",
                &format!("Top {} Cities by Developer Density", insights.config.top_cities),
                counts("City", &insights.top_cities),
            ),
            section(
                "1.3",
                "Timezone Distribution",
                counts("UTC Offset", &insights.timezones),
            ),
            section("2", "Collaboration Behavior Analysis", Body::Heading),
            section(
                "2.1",
                "Submission Frequency",
                Body::Submissions {
                    summary: submissions.summary,
                    histogram: submissions.histogram.clone(),
                },
            ),
            section(
                "2.2",
                "High Active Users",
                Body::Text(format!(
                    "High active users are those in the top {high_share:.0}% of submission \
                     counts, totaling {} users.",
                    submissions.high_active.len()
                )),
            ),
            section(
                "2.3",
                "Low Active Users",
                Body::Text(format!(
                    "Low active users are those in the bottom {low_share:.0}% of submission \
                     counts, totaling {} users.",
                    submissions.low_active.len()
                )),
            ),
            section("3", "Additional Insights", Body::Heading),
            section(
                "3.1",
                "Influence vs Submission Frequency",
                Body::Influence(insights.influence.clone()),
            ),
            section(
                "3.2",
                "Event Action Types Distribution",
                counts("Event Action", &insights.actions),
            ),
        ];

        Self {
            title: "Data Insights Report".to_string(),
            sections,
        }
    }

    /// Finds a section by its dotted number.
    #[must_use]
    pub fn section(&self, number: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.number == number)
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn section(number: &str, title: &str, body: Body) -> Section {
    Section {
        number: number.to_string(),
        title: title.to_string(),
        body,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for section in &self.sections {
            writeln!(f)?;
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.number, self.title)?;
        match &self.body {
            Body::Heading => Ok(()),
            Body::Text(text) => writeln!(f, "{text}"),
            Body::Counts { label, counts } => write_counts(f, label, counts),
            Body::Submissions { summary, histogram } => {
                if let Some(s) = summary {
                    writeln!(
                        f,
                        "users: {}  mean: {:.2}  std: {:.2}  min: {}  25%: {}  50%: {}  75%: {}  max: {}",
                        s.count, s.mean, s.std_dev, s.min, s.p25, s.median, s.p75, s.max
                    )?;
                } else {
                    writeln!(f, "no submissions")?;
                }
                if let Some(h) = histogram {
                    let last = h.counts.len().saturating_sub(1);
                    for (bin, count) in h.counts.iter().enumerate().filter(|&(_, &c)| c > 0) {
                        // The last bin includes the maximum.
                        let close = if bin == last { ']' } else { ')' };
                        writeln!(
                            f,
                            "  [{:>8.2}, {:>8.2}{close} {count}",
                            h.edges[bin],
                            h.edges[bin + 1]
                        )?;
                    }
                }
                Ok(())
            }
            Body::Influence(rows) => {
                writeln!(f, "{:<12} {:>12} {:>12}", "user_id", "submissions", "influence")?;
                for row in rows {
                    let influence = row
                        .total_influence
                        .map_or_else(|| "-".to_string(), |value| value.to_string());
                    writeln!(
                        f,
                        "{:<12} {:>12} {:>12}",
                        row.user_id, row.total_submissions, influence
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, label: &str, counts: &Counts) -> fmt::Result {
    let width = counts
        .entries()
        .iter()
        .map(|entry| entry.value.chars().count())
        .chain([label.chars().count()])
        .max()
        .unwrap_or_default();

    writeln!(f, "{label:<width$}  count")?;
    for entry in counts.entries() {
        writeln!(f, "{:<width$}  {}", entry.value, entry.count)?;
    }
    Ok(())
}
