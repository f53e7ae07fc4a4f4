//! Model-assisted attendance parser.
//!
//! Sends the message, grounded with policy context, to a local text
//! generation endpoint (Ollama `/api/generate` protocol) and coerces the JSON
//! it returns. This strategy is best-effort: any failure surfaces as
//! [`EngineError::ParseUnavailable`] and the caller decides what to do next.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::ParsedAttendance;

use super::coerce_parsed_schema;

/// Instruction sent as the system prompt with every request.
pub const SYSTEM_PROMPT: &str = "You are a payroll assistant.\n\
Return ONLY valid JSON with keys:\n\
days: {mon,tue,wed,thu,fri,sat,sun} values must be \"P\" or \"A\" or \"H\"\n\
otHours: number\n\
otRate: number|null\n\
bonus: number\n\
deduction: number\n\
If not specified, keep absent days as \"A\", numbers as 0, otRate null.\n\
No extra keys. No markdown. No explanations.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    system: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: u8,
}

/// Builds the user prompt from policy context and the message.
pub fn build_prompt(message: &str, policy_context: &str) -> String {
    format!("Policy context:\n{policy_context}\n\nUser message:\n{message}\n\nReturn JSON now.")
}

/// Client for the generation endpoint.
///
/// The request timeout is fixed when the parser is built and bounds the whole
/// call, connection included. There is no retry.
#[derive(Debug, Clone)]
pub struct ModelParser {
    client: Client,
    endpoint: Url,
    model: String,
    timeout: Duration,
}

impl ModelParser {
    /// Builds a parser for `endpoint` using `model`, bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the HTTP client cannot be
    /// constructed.
    pub fn new(endpoint: Url, model: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::InvalidConfig {
                field: "model".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            model: model.into(),
            timeout,
        })
    }

    /// Builds a parser from the `model` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the endpoint is not a
    /// valid URL.
    pub fn from_config(config: &ModelConfig) -> EngineResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| EngineError::InvalidConfig {
            field: "model.endpoint".to_string(),
            message: e.to_string(),
        })?;
        Self::new(endpoint, config.name.clone(), config.timeout())
    }

    /// Returns a parser that talks to the same endpoint with another model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    /// The model name sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model to parse `message`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ParseUnavailable`] when the call times out,
    /// cannot connect, gets a non-success status, or the reply is not a
    /// JSON object whose `response` string is itself a JSON object.
    pub async fn parse(&self, message: &str, policy_context: &str) -> EngineResult<ParsedAttendance> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(message, policy_context),
            system: SYSTEM_PROMPT,
            stream: false,
            options: GenerateOptions { temperature: 0 },
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Calling generation endpoint");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::parse_unavailable(format!(
                "model endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let parsed = parse_generate_body(&body)?;

        info!(model = %self.model, "Parsed attendance with model");
        Ok(parsed)
    }

    fn transport_error(&self, error: reqwest::Error) -> EngineError {
        if error.is_timeout() {
            EngineError::parse_unavailable(format!(
                "model call timed out after {}ms",
                self.timeout.as_millis()
            ))
        } else if error.is_connect() {
            EngineError::parse_unavailable(format!("could not connect to model endpoint: {error}"))
        } else {
            EngineError::parse_unavailable(format!("model request failed: {error}"))
        }
    }
}

/// Decodes a generate-endpoint reply into a typed attendance result.
fn parse_generate_body(body: &[u8]) -> EngineResult<ParsedAttendance> {
    let envelope: Value = serde_json::from_slice(body)
        .map_err(|e| EngineError::parse_unavailable(format!("reply is not JSON: {e}")))?;

    let text = envelope
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();

    let inner: Value = serde_json::from_str(text).map_err(|e| {
        EngineError::parse_unavailable(format!("model response is not JSON: {e}"))
    })?;

    match inner {
        Value::Object(object) => coerce_parsed_schema(&object),
        _ => Err(EngineError::parse_unavailable(
            "model response is not a JSON object",
        )),
    }
}
