//! Descriptive statistics over small in-memory columns.
//!
//! - [`quantile`]: linear-interpolation quantiles
//! - [`Summary`]: count, mean, standard deviation, quartiles, range
//! - [`Histogram`]: equal-width bin counts
//! - [`Counts`]: frequency table of categorical values

use std::collections::BTreeMap;

use serde::Serialize;

/// Returns the `q`-quantile of the finite values in `data`.
///
/// Uses linear interpolation between the two closest ranks, so `q = 0.5`
/// of an even-length column is the mean of the middle pair. Returns `None`
/// if `q` is outside `[0, 1]` or `data` has no finite values.
#[must_use]
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let sorted = sorted_finite(data);
    quantile_sorted(&sorted, q)
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;

    #[allow(clippy::cast_precision_loss)]
    let position = q * last as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    #[allow(clippy::cast_precision_loss)]
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of finite values.
    pub count: usize,
    /// Number of NaN or infinite values left out.
    pub missing: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN for fewer than two values.
    pub std_dev: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    /// Computes summary statistics, or `None` if `data` has no finite values.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(data);
        let count = sorted.len();
        if count == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std_dev = if count < 2 {
            f64::NAN
        } else {
            (sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        };

        Some(Self {
            count,
            missing: data.len() - count,
            mean,
            std_dev,
            min: sorted[0],
            p25: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            p75: quantile_sorted(&sorted, 0.75)?,
            max: sorted[count - 1],
        })
    }
}

/// Equal-width histogram of a numeric column.
///
/// `edges` has one more entry than `counts`. Every bin is half-open except
/// the last, which includes the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins the finite values of `data` into `bins` equal-width bins spanning
    /// the data range.
    ///
    /// A constant column is centred in a range of width one. Returns `None`
    /// if `bins` is zero or `data` has no finite values.
    #[must_use]
    pub fn new(data: &[f64], bins: usize) -> Option<Self> {
        let sorted = sorted_finite(data);
        let (&first, &last) = (sorted.first()?, sorted.last()?);
        if bins == 0 {
            return None;
        }

        #[allow(clippy::float_cmp)]
        let (low, high) = if first == last {
            (first - 0.5, last + 0.5)
        } else {
            (first, last)
        };

        #[allow(clippy::cast_precision_loss)]
        let width = (high - low) / bins as f64;
        #[allow(clippy::cast_precision_loss)]
        let edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for value in sorted {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bin = (((value - low) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Total number of binned values.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// One row of a [`Counts`] table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

/// Frequency table of categorical values.
///
/// Rows are ordered by count, highest first; equal counts are ordered by
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counts {
    entries: Vec<Count>,
}

impl Counts {
    /// Counts how often each value occurs.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally: BTreeMap<String, usize> = BTreeMap::new();
        for value in values {
            *tally.entry(value.as_ref().to_string()).or_default() += 1;
        }

        let mut entries: Vec<Count> = tally
            .into_iter()
            .map(|(value, count)| Count { value, count })
            .collect();
        // Stable sort keeps the BTreeMap's value order within equal counts.
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Count] {
        &self.entries
    }

    /// Returns the `n` most frequent values.
    #[must_use]
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Returns how often `value` occurred.
    #[must_use]
    pub fn get(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map_or(0, |entry| entry.count)
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quantile_interpolates_between_ranks() {
        let data = [1.0, 2.0, 3.0, 4.0];

        assert_relative_eq!(quantile(&data, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&data, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), 2.5);
        assert_relative_eq!(quantile(&data, 0.75).unwrap(), 3.25);
        assert_relative_eq!(quantile(&data, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn quantile_ignores_order_and_nan() {
        let data = [4.0, f64::NAN, 1.0, 3.0, 2.0];
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), 2.5);
    }

    #[test]
    fn quantile_edge_cases() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[1.0], 1.5), None);
        assert_eq!(quantile(&[1.0], -0.1), None);
        assert_relative_eq!(quantile(&[7.0], 0.3).unwrap(), 7.0);
    }

    #[test]
    fn summary_of_small_column() {
        let summary = Summary::from_data(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert_eq!(summary.count, 8);
        assert_eq!(summary.missing, 0);
        assert_relative_eq!(summary.mean, 5.0);
        assert_relative_eq!(summary.std_dev, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(summary.min, 2.0);
        assert_relative_eq!(summary.p25, 4.0);
        assert_relative_eq!(summary.median, 4.5);
        assert_relative_eq!(summary.p75, 5.5);
        assert_relative_eq!(summary.max, 9.0);
    }

    #[test]
    fn summary_of_single_value() {
        let summary = Summary::from_data(&[3.0, f64::INFINITY]).unwrap();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.missing, 1);
        assert!(summary.std_dev.is_nan());
        assert!(Summary::from_data(&[]).is_none());
    }

    #[test]
    fn histogram_bins_cover_range() {
        let histogram = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();

        assert_eq!(histogram.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(histogram.counts, vec![1, 1, 1, 2]);
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn histogram_of_constant_column() {
        let histogram = Histogram::new(&[2.0, 2.0, 2.0], 2).unwrap();

        assert_eq!(histogram.edges, vec![1.5, 2.0, 2.5]);
        assert_eq!(histogram.counts, vec![0, 3]);
        assert!(Histogram::new(&[1.0], 0).is_none());
        assert!(Histogram::new(&[], 3).is_none());
    }

    #[test]
    fn counts_order_by_frequency_then_value() {
        let counts = Counts::from_values(["b", "a", "c", "b", "c", "d"]);

        let rows: Vec<(&str, usize)> = counts
            .entries()
            .iter()
            .map(|c| (c.value.as_str(), c.count))
            .collect();

        assert_eq!(rows, vec![("b", 2), ("c", 2), ("a", 1), ("d", 1)]);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get("c"), 2);
        assert_eq!(counts.get("z"), 0);
        assert_eq!(counts.top(1).entries()[0].value, "b");
    }
}
