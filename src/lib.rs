//! Weekly wage engine for daily-rated workers.
//!
//! This crate computes a worker's weekly pay from seven days of attendance
//! (present, half day or absent), overtime, bonus and deductions. Attendance
//! can be entered directly or parsed from a free-form message, either by a
//! local language model or by fixed pattern rules. Workers and saved weeks
//! are kept in SQLite and served over a small HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod policy;
pub mod store;
