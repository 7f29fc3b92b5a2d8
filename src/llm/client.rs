//! OpenRouter chat-completions client.
//!
//! Translates a (system, user) prompt pair into one upstream call and
//! extracts the first choice's text. Retry policy lives in [`super::retry`];
//! this client classifies each failure so the wrapper can decide.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{ChatRequest, ChatResponse};
use super::LlmError;
use crate::config::Config;

/// Seam between handlers and the LLM provider.
///
/// Handlers only ever see this trait, so tests can swap in a mock backend
/// and assert how often it was hit.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Perform one completion attempt and return the raw response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Client for OpenRouter's OpenAI-compatible endpoint.
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for OpenRouterClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_id = Uuid::new_v4();
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest::new(&self.model, system, user);

        debug!(
            request_id = %request_id,
            model = %self.model,
            user_prompt_len = user.len(),
            "Sending completion request"
        );

        let response = match self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                warn!(request_id = %request_id, error = %e, "Completion request timed out");
                return Err(LlmError::Timeout {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Completion request failed");
                return Err(LlmError::Network(e.to_string()));
            }
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(response.headers());
            let message = provider_error_message(&response.text().await.unwrap_or_default());
            warn!(
                request_id = %request_id,
                retry_after_secs = ?retry_after.map(|d| d.as_secs_f64()),
                message = %message,
                "Provider rate limited the request"
            );
            return Err(LlmError::RateLimited {
                message,
                retry_after,
            });
        }

        if !status.is_success() {
            let message = provider_error_message(&response.text().await.unwrap_or_default());
            warn!(
                request_id = %request_id,
                status = %status,
                message = %message,
                "Provider returned an error"
            );
            // Some gateways report upstream timeouts as a status rather than
            // cutting the connection.
            if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::REQUEST_TIMEOUT {
                return Err(LlmError::Timeout { message });
            }
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::MalformedResponse)?;

        debug!(request_id = %request_id, response_len = content.len(), "Completion succeeded");
        Ok(content)
    }
}

/// Parse `Retry-After` header into a Duration (numeric seconds only).
fn parse_retry_after(headers: &header::HeaderMap) -> Option<std::time::Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?;
    let secs: f64 = value.parse().ok()?;
    if secs > 0.0 {
        Some(std::time::Duration::from_secs_f64(secs))
    } else {
        None
    }
}

/// Extract a human-readable message from a provider error body.
///
/// Providers wrap errors as `{"error": {"message": ...}}` or `{"message": ...}`;
/// anything unparseable is returned as-is.
fn provider_error_message(raw: &str) -> String {
    let parse = || -> Option<String> {
        let json_str = raw.find('{').map(|idx| &raw[idx..]).unwrap_or(raw);
        let parsed: serde_json::Value = serde_json::from_str(json_str).ok()?;
        parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| parsed.get("message").and_then(|m| m.as_str()))
            .map(|s| s.to_string())
    };
    match parse() {
        Some(message) => message,
        None if raw.trim().is_empty() => "no error details from provider".to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_message_reads_nested_error() {
        let raw = r#"{"error":{"message":"Rate limit exceeded","code":429}}"#;
        assert_eq!(provider_error_message(raw), "Rate limit exceeded");
    }

    #[test]
    fn provider_error_message_reads_flat_message() {
        let raw = r#"{"message":"upstream unavailable"}"#;
        assert_eq!(provider_error_message(raw), "upstream unavailable");
    }

    #[test]
    fn provider_error_message_handles_json_after_status_prefix() {
        let raw = r#"429 {"error":{"message":"slow down"}}"#;
        assert_eq!(provider_error_message(raw), "slow down");
    }

    #[test]
    fn provider_error_message_falls_back_to_raw_text() {
        assert_eq!(provider_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(
            provider_error_message(""),
            "no error details from provider"
        );
    }

    #[test]
    fn parse_retry_after_numeric_seconds() {
        let mut headers = header::HeaderMap::new();
        headers.insert("retry-after", "2.5".parse().unwrap());
        assert_eq!(
            parse_retry_after(&headers),
            Some(std::time::Duration::from_secs_f64(2.5))
        );
    }

    #[test]
    fn parse_retry_after_rejects_non_numeric() {
        let mut headers = header::HeaderMap::new();
        headers.insert("retry-after", "Wed, 21 Oct 2026 07:28:00 GMT".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), None);
    }
}
