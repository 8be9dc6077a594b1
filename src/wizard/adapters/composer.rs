//! HTTP Message Composer
//!
//! Calls an external text-generation endpoint over JSON. Request/response
//! shapes follow the generateContent-style API the checkout client uses.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::MessageComposer;
use crate::config::ComposerConfig;

/// Fixed notice used when generation fails. The wizard proceeds to
/// payment regardless of composer success or failure.
pub const FALLBACK_MESSAGE: &str =
    "Top-up sent! Enjoy the credit. (Error generating custom message)";

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Generation endpoint returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Empty generation result")]
    Empty,

    #[error("Missing API key (env {0})")]
    MissingApiKey(String),
}

/// Generation request body
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    contents: &'a str,
}

/// Generation response body
#[derive(Deserialize)]
struct GenerateResponse {
    text: Option<String>,
}

pub struct HttpComposer {
    config: ComposerConfig,
    client: reqwest::Client,
}

impl HttpComposer {
    pub fn new(config: ComposerConfig) -> Result<Self, ComposerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ComposerError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl MessageComposer for HttpComposer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ComposerError> {
        let api_key = std::env::var(&self.config.api_key_env)
            .map_err(|_| ComposerError::MissingApiKey(self.config.api_key_env.clone()))?;

        let body = GenerateRequest {
            model: &self.config.model,
            contents: prompt,
        };

        debug!(model = %self.config.model, "Requesting generated message");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ComposerError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Generation endpoint rejected request");
            return Err(ComposerError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ComposerError::Malformed(e.to_string()))?;

        match parsed.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ComposerError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"text": "Salaam! Credit is on its way."}"#).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("Salaam! Credit is on its way."));

        let empty: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.text.is_none());
    }

    #[test]
    fn test_request_shape() {
        let body = GenerateRequest {
            model: "gemini-3-flash-preview",
            contents: "a short warm note",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"model\""));
        assert!(json.contains("\"contents\""));
    }

    #[test]
    fn test_fallback_is_fixed() {
        assert!(!FALLBACK_MESSAGE.is_empty());
        assert!(FALLBACK_MESSAGE.contains("Top-up sent!"));
    }
}
