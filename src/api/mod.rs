//! HTTP API for the weekly wage service.
//!
//! This module provides REST endpoints for managing workers, previewing and
//! saving weekly wages, parsing attendance messages and searching the payroll
//! policy.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MIN_DAILY_RATE, NewWorkerRequest, ParseRequest, PolicySearchQuery};
pub use response::{ApiError, ApiErrorResponse, PolicySearchResponse};
pub use state::AppState;
