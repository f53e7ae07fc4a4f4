//! Error types for the weekly wage engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the error conditions that can occur outside the pure calculation
//! paths. Salary calculation and the deterministic attendance parser never
//! fail and therefore never produce these errors.

use thiserror::Error;

/// The main error type for the weekly wage engine.
///
/// # Example
///
/// ```
/// use weekly_wage::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The model-assisted attendance parse could not produce a result.
    ///
    /// Covers timeouts, connection failures, bad HTTP statuses and responses
    /// that are not a JSON attendance object. Callers recover by using the
    /// deterministic parser instead.
    #[error("Model-assisted parse unavailable: {reason}")]
    ParseUnavailable {
        /// Why the model result could not be used.
        reason: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was syntactically valid but unusable.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration field at fault.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The policy file exists but could not be read.
    #[error("Failed to read policy file '{path}': {message}")]
    PolicyRead {
        /// The policy file path.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// Underlying SQLite error, propagated unmodified from the store.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database was written by a newer schema than this crate understands.
    #[error("Unsupported schema version {found}; newest supported is {supported}")]
    UnsupportedSchemaVersion {
        /// The schema version found in the database.
        found: i32,
        /// The newest schema version this crate can open.
        supported: i32,
    },

    /// No worker exists with the given id.
    #[error("Worker not found: {id}")]
    WorkerNotFound {
        /// The worker id that was looked up.
        id: String,
    },

    /// A worker record was invalid.
    #[error("Invalid worker field '{field}': {message}")]
    InvalidWorker {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A request could not be served as given.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::ParseUnavailable`] from any displayable reason.
    pub fn parse_unavailable(reason: impl Into<String>) -> Self {
        Self::ParseUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns true when the error means the caller should fall back to
    /// deterministic parsing.
    pub fn is_parse_unavailable(&self) -> bool {
        matches!(self, Self::ParseUnavailable { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
