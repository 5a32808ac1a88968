use thiserror::Error;

/// Errors raised while building or scanning a curve.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CurveError {
    #[error("curve has no finite samples")]
    Empty,

    #[error("x and y have different lengths ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("x is not strictly increasing at index {index}")]
    NotSorted { index: usize },

    #[error("non-finite x value {x} at index {index}")]
    NonFiniteX { index: usize, x: f64 },
}
