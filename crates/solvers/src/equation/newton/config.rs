use thiserror::Error;

/// Configuration for the Newton solver.
///
/// The solver stops when a Newton step is shorter than `step_tol` or the
/// residual magnitude is at most `residual_tol`, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Fields"))]
pub struct Config {
    max_iters: usize,
    step_tol: f64,
    residual_tol: f64,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step_tol must be finite and non-negative")]
    StepTol,

    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1000, 1e-7, 0.0).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(max_iters: usize, step_tol: f64, residual_tol: f64) -> Result<Self, ConfigError> {
        if !step_tol.is_finite() || step_tol < 0.0 {
            return Err(ConfigError::StepTol);
        }
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::ResidualTol);
        }

        Ok(Self {
            max_iters,
            step_tol,
            residual_tol,
        })
    }

    /// Returns the maximum number of Newton steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the step length below which the solver reports convergence.
    #[must_use]
    pub fn step_tol(&self) -> f64 {
        self.step_tol
    }

    /// Returns the residual magnitude at or below which the solver reports
    /// convergence.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    /// Returns a copy with a different iteration cap.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }
}

/// Deserialized form of [`Config`]; missing fields take default values.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Fields {
    max_iters: usize,
    step_tol: f64,
    residual_tol: f64,
}

#[cfg(feature = "serde")]
impl Default for Fields {
    fn default() -> Self {
        let config = Config::default();
        Self {
            max_iters: config.max_iters,
            step_tol: config.step_tol,
            residual_tol: config.residual_tol,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Fields> for Config {
    type Error = ConfigError;

    fn try_from(fields: Fields) -> Result<Self, Self::Error> {
        Config::new(fields.max_iters, fields.step_tol, fields.residual_tol)
    }
}
