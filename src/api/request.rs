//! Request types for the wage API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Worker;

/// Smallest accepted daily rate.
pub const MIN_DAILY_RATE: Decimal = Decimal::ONE;

/// Request body for `POST /workers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkerRequest {
    /// Display name. Surrounding whitespace is ignored.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Wage for one full present day.
    pub daily_rate: Decimal,
}

impl NewWorkerRequest {
    /// Checks the request and builds a worker with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWorker`] when the trimmed name is empty
    /// or the daily rate is below [`MIN_DAILY_RATE`].
    pub fn into_worker(self) -> EngineResult<Worker> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidWorker {
                field: "name".to_string(),
                message: "name is required".to_string(),
            });
        }
        if self.daily_rate < MIN_DAILY_RATE {
            return Err(EngineError::InvalidWorker {
                field: "dailyRate".to_string(),
                message: format!("must be at least {}", MIN_DAILY_RATE),
            });
        }
        Ok(Worker::new(name, self.phone.trim(), self.daily_rate))
    }
}

/// Request body for `POST /attendance/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Free-form attendance message.
    pub message: String,
    /// Model name to use instead of the configured one.
    #[serde(default)]
    pub model: Option<String>,
}

/// Query string for `GET /policy/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySearchQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
    /// Number of lines to return; the configured default when absent.
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, rate: i64) -> NewWorkerRequest {
        NewWorkerRequest {
            name: name.to_string(),
            phone: String::new(),
            daily_rate: Decimal::new(rate, 0),
        }
    }

    #[test]
    fn test_deserialize_new_worker_request() {
        let json = r#"{"name": "Ravi", "dailyRate": "700"}"#;
        let req: NewWorkerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Ravi");
        assert_eq!(req.phone, "");
        assert_eq!(req.daily_rate, Decimal::new(700, 0));
    }

    #[test]
    fn test_worker_name_is_trimmed() {
        let worker = request("  Ravi  ", 700).into_worker().unwrap();
        assert_eq!(worker.name, "Ravi");
        assert!(worker.id.starts_with("w_"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        match request("   ", 700).into_worker() {
            Err(EngineError::InvalidWorker { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidWorker, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_below_one_is_rejected() {
        match request("Ravi", 0).into_worker() {
            Err(EngineError::InvalidWorker { field, .. }) => assert_eq!(field, "dailyRate"),
            other => panic!("Expected InvalidWorker, got {:?}", other),
        }
        assert!(request("Ravi", 1).into_worker().is_ok());
    }

    #[test]
    fn test_parse_request_model_is_optional() {
        let req: ParseRequest = serde_json::from_str(r#"{"message": "mon present"}"#).unwrap();
        assert_eq!(req.model, None);
    }
}
