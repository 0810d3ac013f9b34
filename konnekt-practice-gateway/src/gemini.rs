//! Gemini `generateContent` client.
//!
//! Both call styles hit the same endpoint. Structured calls add a
//! `generationConfig` with a JSON response type and schema, and the
//! returned text is parsed as JSON.

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::traits::ContentGateway;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiGateway {
    config: GatewayConfig,
    api_key: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiGateway {
    /// Create a gateway, failing if no API key is configured
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GatewayError::MissingApiKey)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            api_key,
            http_client,
        })
    }

    async fn generate(&self, body: serde_json::Value) -> Result<String> {
        let started = Instant::now();

        let response = self
            .http_client
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(GatewayError::status(status.as_u16(), error_message(&body)));
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply.into_text()?;

        tracing::debug!(
            model = %self.config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.len(),
            "Gemini reply received"
        );
        Ok(text)
    }
}

#[async_trait]
impl ContentGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        }))
        .await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let text = self
            .generate(json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseJsonSchema": schema,
                },
            }))
            .await?;

        Ok(serde_json::from_str(strip_code_fence(&text))?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, trimmed
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GatewayError::Blocked(reason));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// `error.message` of a Google API error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Some models wrap JSON output in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = GeminiGateway::new(GatewayConfig::default());
        assert!(matches!(result, Err(GatewayError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let result = GeminiGateway::new(GatewayConfig::default().with_api_key("   "));
        assert!(matches!(result, Err(GatewayError::MissingApiKey)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let gateway = GeminiGateway::new(GatewayConfig::default().with_api_key("secret-key"))
            .unwrap();
        let debug = format!("{:?}", gateway);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_reply_parts_are_joined_and_trimmed() {
        let reply: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  What is " }, { "text": "your name?\n" }] } }]
        }))
        .unwrap();
        assert_eq!(reply.into_text().unwrap(), "What is your name?");
    }

    #[test]
    fn test_blocked_prompt() {
        let reply: GenerateResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(reply.into_text(), Err(GatewayError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_empty_candidates() {
        let reply: GenerateResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(reply.into_text(), Err(GatewayError::EmptyResponse)));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence(" {\"a\":1} "), "{\"a\":1}");
    }
}
