//! Router construction and shared application state.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::{summarize, tools, types::HealthResponse};
use crate::config::Config;
use crate::llm::{with_retry, ChatBackend, LlmError, OpenRouterClient, RetryPolicy};
use crate::prompts::Tool;

/// State shared by all handlers.
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn ChatBackend>,
    pub retry: RetryPolicy,
}

impl AppState {
    /// Build state with the real OpenRouter backend.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = Arc::new(OpenRouterClient::new(&config)?);
        Ok(Self {
            retry: RetryPolicy::from_config(&config),
            backend,
            config,
        })
    }

    /// Build state with a custom backend (useful for testing).
    pub fn with_backend(config: Config, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            retry: RetryPolicy::from_config(&config),
            backend,
            config,
        }
    }

    /// Run one tool request through the retry wrapper and the LLM client.
    pub async fn generate(&self, tool: Tool, user_prompt: &str) -> Result<String, LlmError> {
        info!(
            tool = tool.name(),
            prompt_len = user_prompt.len(),
            "Dispatching tool request"
        );
        with_retry(&self.retry, || {
            self.backend.complete(tool.instruction(), user_prompt)
        })
        .await
    }
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/get-review", post(tools::get_review))
        .route("/get-code", post(tools::get_code))
        .route("/get-complexity", post(tools::get_complexity))
        .route("/compare-code", post(tools::compare_code))
        .route("/generate-test-cases", post(tools::generate_test_cases))
        .route("/beautify-code", post(tools::beautify_code))
        .route("/debug-code", post(tools::debug_code))
        .route("/analyze-performance", post(tools::analyze_performance))
        .route("/analyze-security", post(tools::analyze_security))
        .route("/dependency-scanner", post(tools::dependency_scanner))
        .route("/code-metrics-analyzer", post(tools::code_metrics_analyzer))
        .route("/explain-code", post(tools::explain_code))
        .route("/summarize-content", post(summarize::summarize_content))
        .route("/summarize-text", post(summarize::summarize_text))
        .route("/summarize-youtube", post(summarize::summarize_youtube));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
