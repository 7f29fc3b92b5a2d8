//! Configuration management for codeforge.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. Your OpenRouter API key.
//! - `OPENROUTER_BASE_URL` - Optional. Provider base URL. Defaults to `https://openrouter.ai/api/v1`.
//! - `MODEL` - Optional. The model to use for all tools. Defaults to `mistralai/devstral-small`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_RETRIES` - Optional. Maximum LLM call attempts on rate limiting. Defaults to `3`.
//! - `INITIAL_BACKOFF_MS` - Optional. First retry delay in milliseconds. Defaults to `1000`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Upstream request timeout. Defaults to `300`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key
    pub api_key: String,

    /// Provider base URL (OpenAI-compatible)
    pub base_url: String,

    /// Model identifier (OpenRouter format)
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum LLM call attempts when rate limited
    pub max_retries: u32,

    /// First retry delay in milliseconds (doubles per attempt)
    pub initial_backoff_ms: u64,

    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        let model =
            std::env::var("MODEL").unwrap_or_else(|_| "mistralai/devstral-small".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_retries = std::env::var("MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_RETRIES".to_string(), format!("{}", e)))?;

        let initial_backoff_ms = std::env::var("INITIAL_BACKOFF_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("INITIAL_BACKOFF_MS".to_string(), format!("{}", e))
            })?;

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            base_url,
            model,
            host,
            port,
            max_retries,
            initial_backoff_ms,
            request_timeout_secs,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_retries: 3,
            initial_backoff_ms: 1000,
            request_timeout_secs: 300,
        }
    }
}
