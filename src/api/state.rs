//! Application state for the wage API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::parser::ModelParser;
use crate::policy::PolicyIndex;
use crate::store::WageStore;

/// Shared application state.
///
/// The store holds a single SQLite connection, so it sits behind an async
/// mutex. Everything else is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    store: Arc<Mutex<WageStore>>,
    policy: Arc<PolicyIndex>,
    model: Arc<ModelParser>,
}

impl AppState {
    /// Creates application state from already-built parts.
    pub fn new(
        config: AppConfig,
        store: WageStore,
        policy: PolicyIndex,
        model: ModelParser,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
            policy: Arc::new(policy),
            model: Arc::new(model),
        }
    }

    /// Opens the database, loads the policy file and builds the model client
    /// described by `config`.
    pub fn from_config(config: AppConfig) -> EngineResult<Self> {
        let store = WageStore::open(&config.database.path)?;
        let policy = PolicyIndex::load(&config.policy.path)?;
        let model = ModelParser::from_config(&config.model)?;

        info!(
            database = %config.database.path.display(),
            policy_lines = policy.len(),
            model = %model.model(),
            "Application state ready"
        );
        Ok(Self::new(config, store, policy, model))
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the shared store handle.
    pub fn store(&self) -> &Mutex<WageStore> {
        &self.store
    }

    /// Returns the policy index.
    pub fn policy(&self) -> &PolicyIndex {
        &self.policy
    }

    /// Returns the default model parser.
    pub fn model(&self) -> &ModelParser {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_config_with_missing_policy_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.path = dir.path().join("wages.db");
        config.policy.path = dir.path().join("absent.txt");

        let state = AppState::from_config(config).unwrap();
        assert!(state.policy().is_empty());
        assert_eq!(state.model().model(), "llama3.1");
    }
}
