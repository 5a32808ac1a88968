use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use sift_analysis::events::AnalysisConfig;
use sift_solvers::equation::newton;
use thiserror::Error;

/// Settings read from the `--config` file.
///
/// Missing tables and keys keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub newton: newton::Config,
    pub events: AnalysisConfig,
}

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_tables_override_single_keys() {
        let settings: Settings = toml::from_str(
            r"
            [newton]
            max_iters = 25

            [events]
            top_cities = 3
            ",
        )
        .unwrap();

        assert_eq!(settings.newton.max_iters(), 25);
        assert_eq!(settings.newton.step_tol(), newton::Config::default().step_tol());
        assert_eq!(settings.events.top_cities, 3);
        assert_eq!(settings.events.high_quantile, 0.75);
    }

    #[test]
    fn invalid_tolerance_is_rejected() {
        let result = toml::from_str::<Settings>("[newton]\nstep_tol = -1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("[newton]\ntolerance = 1e-9\n").is_err());
        assert!(toml::from_str::<Settings>("[plots]\n").is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn unreadable_file_is_reported() {
        let error = Settings::load(Some(Path::new("no/such/sift.toml"))).unwrap_err();
        assert!(matches!(error, SettingsError::Read { .. }));
    }
}
