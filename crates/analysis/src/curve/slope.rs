use serde::Serialize;

use super::{Sample, scan::crossing};

/// Whether a stationary point is a local maximum or minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationaryKind {
    /// Slope goes from positive to negative.
    Peak,
    /// Slope goes from negative to positive.
    Trough,
}

/// A point where the estimated slope crosses zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationaryPoint {
    /// Index of the sample on the left of the crossing.
    pub index: usize,
    pub x: f64,
    /// `y` interpolated linearly between the neighbouring samples.
    pub y: f64,
    pub kind: StationaryKind,
}

/// Estimates `dy/dx` at every sample.
///
/// Interior points use the second-order central difference for uneven
/// spacing; the two end points use one-sided first-order differences.
/// Returns an empty vector for fewer than two samples.
#[must_use]
pub fn slope(samples: &[Sample]) -> Vec<Sample> {
    let n = samples.len();
    if n < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push(Sample::new(
        samples[0].x,
        forward(samples[0], samples[1]),
    ));

    for window in samples.windows(3) {
        let [prev, here, next] = [window[0], window[1], window[2]];
        let hs = here.x - prev.x;
        let hd = next.x - here.x;
        let dy = (hs * hs * next.y + (hd * hd - hs * hs) * here.y - hd * hd * prev.y)
            / (hs * hd * (hd + hs));
        out.push(Sample::new(here.x, dy));
    }

    out.push(Sample::new(
        samples[n - 1].x,
        forward(samples[n - 2], samples[n - 1]),
    ));
    out
}

fn forward(left: Sample, right: Sample) -> f64 {
    (right.y - left.y) / (right.x - left.x)
}

/// Finds local peaks and troughs as zero crossings of the estimated slope.
///
/// A slope of exactly zero at a sample yields one point there, classified by
/// the nearest nonzero slopes on either side. If those have the same sign the
/// sample is a saddle and is not reported. A flat stretch touching either end
/// of the curve has no slope on its outer side and is never reported.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn stationary_points(samples: &[Sample]) -> Vec<StationaryPoint> {
    let slopes = slope(samples);
    let mut points = Vec::new();

    for (index, pair) in slopes.windows(2).enumerate() {
        let before = pair[0].y;
        // Either the curve starts flat or the previous interval ended here.
        if before == 0.0 {
            continue;
        }
        let Some(x) = crossing(pair[0], pair[1]) else {
            continue;
        };
        // Flat from here to the end.
        let Some(after) = slopes[index + 1..].iter().map(|s| s.y).find(|&y| y != 0.0) else {
            continue;
        };
        if before * after > 0.0 {
            continue;
        }
        let kind = if after < before {
            StationaryKind::Peak
        } else {
            StationaryKind::Trough
        };

        let (left, right) = (samples[index], samples[index + 1]);
        let t = (x - left.x) / (right.x - left.x);
        let y = left.y * (1.0 - t) + right.y * t;
        points.push(StationaryPoint { index, x, y, kind });
    }

    points
}
