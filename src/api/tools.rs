//! Handlers for the code-tool endpoints.
//!
//! Every handler follows the same pipeline: validate required fields, build
//! the user prompt, run it through the retry wrapper and the LLM client,
//! strip code fences, shape the body.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{
    CodeRequest, CompareRequest, FileContentRequest, MetricsRequest, MetricsResponse,
    PromptRequest,
};
use crate::prompts::Tool;
use crate::sanitize::{extract_recommended_fix, strip_code_fences};

/// Reject absent or blank required fields with the endpoint's own message.
pub(super) fn require(field: Option<String>, message: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::MissingField(message.to_string())),
    }
}

/// Validate a code+language body and build the standard user prompt.
fn code_prompt(req: CodeRequest) -> Result<String, ApiError> {
    let code = require(req.code, "Code is required")?;
    let language = require(req.language, "Language is required")?;
    Ok(format!("Language: {}\n\n{}", language, code))
}

pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<String, ApiError> {
    let prompt = require(req.prompt, "Prompt is required")?;
    let raw = state.generate(Tool::CodeReview, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn get_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<String, ApiError> {
    let prompt = require(req.prompt, "Prompt is required")?;
    let raw = state.generate(Tool::CodeGeneration, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn get_complexity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<String, ApiError> {
    let prompt = require(req.prompt, "Prompt is required")?;
    let raw = state.generate(Tool::ComplexityAnalysis, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn compare_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> Result<String, ApiError> {
    let code1 = require(req.code1, "Code 1 is required")?;
    let code2 = require(req.code2, "Code 2 is required")?;
    let language = require(req.language, "Language is required")?;
    let prompt = format!(
        "Compare these two {} code snippets:\n\nCode 1:\n{}\n\nCode 2:\n{}",
        language, code1, code2
    );
    let raw = state.generate(Tool::CodeComparison, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn generate_test_cases(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let code = require(req.code, "Code is required")?;
    let language = require(req.language, "Language is required")?;
    let prompt = format!(
        "Generate test cases for the following {} code:\n\n{}",
        language, code
    );
    let raw = state.generate(Tool::TestCaseGeneration, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn beautify_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let prompt = code_prompt(req)?;
    let raw = state.generate(Tool::CodeBeautification, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn debug_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let prompt = code_prompt(req)?;
    let raw = state.generate(Tool::CodeDebugging, &prompt).await?;
    if let Some(fix) = extract_recommended_fix(&raw) {
        debug!(fix_len = fix.len(), "Debug report contains a recommended fix");
    }
    Ok(strip_code_fences(&raw))
}

pub async fn analyze_performance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let prompt = code_prompt(req)?;
    let raw = state.generate(Tool::PerformanceAnalysis, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn analyze_security(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let prompt = code_prompt(req)?;
    let raw = state.generate(Tool::SecurityAnalysis, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn dependency_scanner(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileContentRequest>,
) -> Result<String, ApiError> {
    let file_content = require(req.file_content, "File content is required")?;
    let raw = state.generate(Tool::DependencyScanning, &file_content).await?;
    Ok(strip_code_fences(&raw))
}

pub async fn code_metrics_analyzer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MetricsRequest>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let code = require(req.code, "Code is required")?;
    let prompt = format!(
        "Analyze the following code and compute its metrics:\n\n{}",
        code
    );
    let raw = state.generate(Tool::CodeMetrics, &prompt).await?;
    Ok(Json(MetricsResponse {
        result: strip_code_fences(&raw),
    }))
}

pub async fn explain_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> Result<String, ApiError> {
    let prompt = code_prompt(req)?;
    let raw = state.generate(Tool::CodeExplanation, &prompt).await?;
    Ok(strip_code_fences(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::{ChatBackend, LlmError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Backend that counts invocations and returns a canned response.
    struct MockBackend {
        calls: AtomicU32,
        response: String,
    }

    impl MockBackend {
        fn returning(response: &str) -> Self {
            Self {
                calls: AtomicU32::new(0),
                response: response.to_string(),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for MockBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn state_with(backend: Arc<MockBackend>) -> Arc<AppState> {
        let config = Config::new(
            "sk-test".to_string(),
            "http://localhost:0".to_string(),
            "mistralai/devstral-small".to_string(),
        );
        Arc::new(AppState::with_backend(config, backend))
    }

    #[tokio::test]
    async fn missing_prompt_is_rejected_without_backend_call() {
        let backend = Arc::new(MockBackend::returning("unused"));
        let state = state_with(backend.clone());

        let result = get_review(State(state), Json(PromptRequest { prompt: None })).await;

        match result.unwrap_err() {
            ApiError::MissingField(message) => assert_eq!(message, "Prompt is required"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_language_is_rejected_without_backend_call() {
        let backend = Arc::new(MockBackend::returning("unused"));
        let state = state_with(backend.clone());

        let result = debug_code(
            State(state),
            Json(CodeRequest {
                code: Some("fn main() {}".to_string()),
                language: Some("   ".to_string()),
            }),
        )
        .await;

        match result.unwrap_err() {
            ApiError::MissingField(message) => assert_eq!(message, "Language is required"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn compare_code_requires_both_snippets() {
        let backend = Arc::new(MockBackend::returning("unused"));
        let state = state_with(backend.clone());

        let result = compare_code(
            State(state),
            Json(CompareRequest {
                code1: Some("a".to_string()),
                code2: None,
                language: Some("python".to_string()),
            }),
        )
        .await;

        match result.unwrap_err() {
            ApiError::MissingField(message) => assert_eq!(message, "Code 2 is required"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_review_strips_fences_from_response() {
        let backend = Arc::new(MockBackend::returning(
            "```js\nfunction add(a,b){return a+b}\n```",
        ));
        let state = state_with(backend.clone());

        let body = get_review(
            State(state),
            Json(PromptRequest {
                prompt: Some("function add(a,b){return a+b}".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body, "function add(a,b){return a+b}");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn code_metrics_returns_json_envelope() {
        let backend = Arc::new(MockBackend::returning("| LOC | 12 |"));
        let state = state_with(backend);

        let Json(response) = code_metrics_analyzer(
            State(state),
            Json(MetricsRequest {
                code: Some("print(1)".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.result, "| LOC | 12 |");
    }
}
