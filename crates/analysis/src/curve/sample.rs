use serde::{Deserialize, Serialize};

use super::{
    CurveError, CurveScan, StationaryPoint, ZeroCrossings, scan, slope, stationary_points,
    zero_crossings,
};

/// A single `(x, y)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Samples whose `x` values are finite and strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    samples: Vec<Sample>,
}

impl Curve {
    /// Validates the ordering of `samples`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NonFiniteX`] or [`CurveError::NotSorted`] for the
    /// first offending sample.
    pub fn new(samples: Vec<Sample>) -> Result<Self, CurveError> {
        for (index, sample) in samples.iter().enumerate() {
            if !sample.x.is_finite() {
                return Err(CurveError::NonFiniteX { index, x: sample.x });
            }
            if index > 0 && sample.x <= samples[index - 1].x {
                return Err(CurveError::NotSorted { index });
            }
        }
        Ok(Self { samples })
    }

    /// Pairs up parallel `x` and `y` columns.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::LengthMismatch`] if the columns differ in length,
    /// otherwise the same errors as [`Curve::new`].
    pub fn from_columns(x: &[f64], y: &[f64]) -> Result<Self, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Self::new(x.iter().zip(y).map(|(&x, &y)| Sample { x, y }).collect())
    }

    /// Sorts `samples` by `x` before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if any `x` is non-finite or repeated.
    pub fn sorted(mut samples: Vec<Sample>) -> Result<Self, CurveError> {
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self::new(samples)
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// See [`scan`].
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Empty`] if no sample has a finite `y`.
    pub fn scan(&self) -> Result<CurveScan, CurveError> {
        scan(&self.samples)
    }

    pub fn zero_crossings(&self) -> ZeroCrossings<'_> {
        zero_crossings(&self.samples)
    }

    #[must_use]
    pub fn slope(&self) -> Vec<Sample> {
        slope(&self.samples)
    }

    #[must_use]
    pub fn stationary_points(&self) -> Vec<StationaryPoint> {
        stationary_points(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn accepts_increasing_x() {
        let curve = Curve::new(samples(&[(0.0, 1.0), (0.5, 2.0), (3.0, -1.0)])).unwrap();
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn rejects_repeated_or_decreasing_x() {
        let repeated = Curve::new(samples(&[(0.0, 1.0), (1.0, 2.0), (1.0, 3.0)]));
        assert_eq!(repeated, Err(CurveError::NotSorted { index: 2 }));

        let decreasing = Curve::new(samples(&[(2.0, 1.0), (1.0, 2.0)]));
        assert_eq!(decreasing, Err(CurveError::NotSorted { index: 1 }));
    }

    #[test]
    fn rejects_non_finite_x() {
        let result = Curve::new(samples(&[(0.0, 1.0), (f64::NAN, 2.0)]));
        assert!(matches!(result, Err(CurveError::NonFiniteX { index: 1, .. })));
    }

    #[test]
    fn sorted_orders_samples() {
        let curve = Curve::sorted(samples(&[(2.0, 3.0), (0.0, -1.0), (1.0, 1.0)])).unwrap();
        let xs: Vec<f64> = curve.samples().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn from_columns_checks_lengths() {
        let result = Curve::from_columns(&[0.0, 1.0], &[1.0]);
        assert_eq!(result, Err(CurveError::LengthMismatch { x: 2, y: 1 }));
    }
}
