//! Persistence for workers and week records.
//!
//! The store keeps one row per worker and at most one week record per
//! `(worker_id, week_start)`. Storage errors are returned to the caller
//! unchanged as [`EngineError::Storage`](crate::error::EngineError::Storage).

mod schema;
mod wage_store;

pub use schema::CURRENT_SCHEMA_VERSION;
pub use wage_store::WageStore;
