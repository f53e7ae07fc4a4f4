//! Configuration types for the wage service.
//!
//! These structures are deserialized from the YAML configuration file. Every
//! section and field has a default, so a partial file (or none at all) is a
//! valid configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Local language model settings used by the assisted attendance parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model name sent with each request.
    pub name: String,
    /// Upper bound on a single model call, in seconds.
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// The call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            name: "llama3.1".to_string(),
            timeout_secs: 4,
        }
    }
}

/// Policy file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Path to the line-per-rule policy text file.
    pub path: PathBuf,
    /// Number of lines retrieved per query.
    pub top_n: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/policies.txt"),
            top_n: crate::policy::DEFAULT_TOP_N,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data.db"),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Language model settings.
    pub model: ModelConfig,
    /// Policy file settings.
    pub policy: PolicyConfig,
    /// Database settings.
    pub database: DatabaseConfig,
}
