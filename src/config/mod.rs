//! Configuration loading for the wage service.
//!
//! This module loads the service configuration from a YAML file: the listen
//! address, the local model endpoint, the policy file and the database path.
//!
//! # Example
//!
//! ```no_run
//! use weekly_wage::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load_or_default("./config/weekly-wage.yaml").unwrap();
//! println!("Model: {}", loader.config().model.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, ModelConfig, PolicyConfig, ServerConfig};
