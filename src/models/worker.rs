//! Worker model.
//!
//! A worker is paid a fixed daily rate for each full day present.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a daily-rated worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Unique identifier (`w_` followed by 12 hex characters).
    pub id: String,
    /// Display name; workers are listed ordered by name.
    pub name: String,
    /// Contact phone number, empty when unknown.
    #[serde(default)]
    pub phone: String,
    /// Wage for one full present day.
    pub daily_rate: Decimal,
}

impl Worker {
    /// Creates a worker with a freshly generated id.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use weekly_wage::models::Worker;
    ///
    /// let worker = Worker::new("Ravi", "", Decimal::new(700, 0));
    /// assert!(worker.id.starts_with("w_"));
    /// assert_eq!(worker.id.len(), 14);
    /// ```
    pub fn new(name: impl Into<String>, phone: impl Into<String>, daily_rate: Decimal) -> Self {
        Self {
            id: short_id("w"),
            name: name.into(),
            phone: phone.into(),
            daily_rate,
        }
    }
}

/// Generates `<prefix>_<12 hex chars>` from a random UUID.
pub(crate) fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..12])
}
