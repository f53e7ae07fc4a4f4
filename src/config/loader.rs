//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use weekly_wage::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/weekly-wage.yaml")?;
/// println!("Listening on {}", loader.config().server.bind);
/// # Ok::<(), weekly_wage::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or a field of the wrong type
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config = Self::load_yaml::<AppConfig>(path.as_ref())?;
        Ok(Self { config })
    }

    /// Like [`load`](Self::load), but a missing file gives the defaults.
    ///
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(EngineError::ConfigNotFound { .. }) if !path.exists() => {
                info!(path = %path.display(), "Configuration file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config = serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::ConfigNotFound {
                path: path_str.clone(),
            },
            _ => EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
