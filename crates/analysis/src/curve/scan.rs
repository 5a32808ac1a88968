use std::iter::FusedIterator;

use serde::Serialize;

use super::{CurveError, Sample};

/// The location of a maximum or minimum sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// An interpolated zero crossing between samples `index` and `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroCrossing {
    pub index: usize,
    pub x: f64,
}

/// Extrema and zero crossings of a sampled curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveScan {
    pub max: Extremum,
    pub min: Extremum,
    pub crossings: Vec<ZeroCrossing>,
}

/// Finds the maximum, minimum, and every zero crossing of `samples`.
///
/// # Errors
///
/// Returns [`CurveError::Empty`] if no sample has a finite `y`.
pub fn scan(samples: &[Sample]) -> Result<CurveScan, CurveError> {
    let max = max(samples).ok_or(CurveError::Empty)?;
    let min = min(samples).ok_or(CurveError::Empty)?;
    let crossings = zero_crossings(samples).collect();

    Ok(CurveScan {
        max,
        min,
        crossings,
    })
}

/// Returns the sample with the largest finite `y`, first one on ties.
#[must_use]
pub fn max(samples: &[Sample]) -> Option<Extremum> {
    extremum(samples, |candidate, best| candidate > best)
}

/// Returns the sample with the smallest finite `y`, first one on ties.
#[must_use]
pub fn min(samples: &[Sample]) -> Option<Extremum> {
    extremum(samples, |candidate, best| candidate < best)
}

fn extremum(samples: &[Sample], replaces: impl Fn(f64, f64) -> bool) -> Option<Extremum> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, sample)| sample.y.is_finite())
        .fold(None, |best: Option<Extremum>, (index, sample)| match best {
            Some(best) if !replaces(sample.y, best.y) => Some(best),
            _ => Some(Extremum {
                index,
                x: sample.x,
                y: sample.y,
            }),
        })
}

/// Lazily yields the zero crossings of `samples` in order of `x`.
pub fn zero_crossings(samples: &[Sample]) -> ZeroCrossings<'_> {
    ZeroCrossings { samples, next: 0 }
}

/// Iterator over the zero crossings of a sample slice.
///
/// Created by [`zero_crossings`].
#[derive(Debug, Clone)]
pub struct ZeroCrossings<'a> {
    samples: &'a [Sample],
    next: usize,
}

impl Iterator for ZeroCrossings<'_> {
    type Item = ZeroCrossing;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next + 1 < self.samples.len() {
            let index = self.next;
            self.next += 1;

            let (left, right) = (self.samples[index], self.samples[index + 1]);
            if let Some(x) = crossing(left, right) {
                return Some(ZeroCrossing { index, x });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len().saturating_sub(self.next + 1);
        (0, Some(remaining))
    }
}

impl FusedIterator for ZeroCrossings<'_> {}

/// Interpolated root between two samples, if their `y` signs differ.
pub(super) fn crossing(left: Sample, right: Sample) -> Option<f64> {
    let (Some(left_sign), Some(right_sign)) = (Sign::of(left.y), Sign::of(right.y)) else {
        return None;
    };
    if left_sign == right_sign {
        return None;
    }

    let dy = right.y - left.y;
    #[allow(clippy::float_cmp)]
    if dy == 0.0 {
        return None;
    }

    #[allow(clippy::float_cmp)]
    if left.y == 0.0 {
        return Some(left.x);
    }
    // Fraction of the interval to the root, in (0, 1] for opposite signs.
    let fraction = 1.0 / (1.0 - right.y / left.y);
    Some(left.x + fraction * (right.x - left.x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Returns `None` for non-finite values.
    fn of(value: f64) -> Option<Self> {
        if !value.is_finite() {
            None
        } else if value > 0.0 {
            Some(Self::Positive)
        } else if value < 0.0 {
            Some(Self::Negative)
        } else {
            Some(Self::Zero)
        }
    }
}
