//! Free-form attendance parsing.
//!
//! Two interchangeable strategies produce a [`ParsedAttendance`]:
//!
//! - [`ModelParser`] asks a local language model and may fail
//! - [`parse_attendance_deterministic`] applies fixed pattern rules and
//!   always succeeds
//!
//! [`parse_with_fallback`] composes them: the model is tried first and, when
//! it is unavailable, the deterministic result is used instead. The failure
//! reason is kept for display only.

mod coerce;
mod fallback;
mod model;

pub use coerce::coerce_parsed_schema;
pub use fallback::parse_attendance_deterministic;
pub use model::{ModelParser, SYSTEM_PROMPT, build_prompt};

use serde::Serialize;
use tracing::warn;

use crate::models::ParsedAttendance;

/// Which strategy produced a parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ParseSource {
    /// The language model answered with a usable object.
    Model,
    /// The model was unavailable and the deterministic rules were used.
    Fallback {
        /// Why the model result was not used.
        reason: String,
    },
}

/// A parse result together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    /// The parsed attendance.
    pub parsed: ParsedAttendance,
    /// Where the result came from.
    #[serde(flatten)]
    pub source: ParseSource,
}

/// Parses `message` with the model, falling back to the deterministic rules.
///
/// This never fails. A model failure is logged and reported in
/// [`ParseOutcome::source`] rather than returned as an error.
pub async fn parse_with_fallback(
    model: &ModelParser,
    message: &str,
    policy_context: &str,
) -> ParseOutcome {
    match model.parse(message, policy_context).await {
        Ok(parsed) => ParseOutcome {
            parsed,
            source: ParseSource::Model,
        },
        Err(err) => {
            warn!(model = %model.model(), error = %err, "Model parse unavailable, using fallback rules");
            ParseOutcome {
                parsed: parse_attendance_deterministic(message),
                source: ParseSource::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use std::time::Duration;

    fn unreachable_parser() -> ModelParser {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let endpoint = Url::parse(&format!("http://{addr}/api/generate")).unwrap();
        ModelParser::new(endpoint, "llama3.1", Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_model_falls_back_to_rules() {
        let message = "Mon to Sat present, Wed half day, OT 3 hours, advance 500, bonus 200";

        let outcome = parse_with_fallback(&unreachable_parser(), message, "").await;

        assert_eq!(outcome.parsed, parse_attendance_deterministic(message));
        match outcome.source {
            ParseSource::Fallback { reason } => {
                assert!(reason.starts_with("Model-assisted parse unavailable"));
            }
            other => panic!("Expected fallback source, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serializes_source_inline() {
        let outcome = ParseOutcome {
            parsed: ParsedAttendance::default(),
            source: ParseSource::Fallback {
                reason: "timed out".to_string(),
            },
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["reason"], "timed out");
        assert!(value["parsed"]["otRate"].is_null());

        let model = ParseOutcome {
            parsed: ParsedAttendance::default(),
            source: ParseSource::Model,
        };
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["source"], "model");
        assert!(value.get("reason").is_none());
    }
}
