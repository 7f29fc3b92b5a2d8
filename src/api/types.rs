//! API request and response types.
//!
//! Request fields are optional at the serde layer so a missing field yields
//! the endpoint's own 400 message instead of a generic deserialization error.

use serde::{Deserialize, Serialize};

/// Body for the single-prompt tools (get-review, get-code, get-complexity).
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Body for the code+language tools (debug, beautify, security, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body for compare-code.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub code1: Option<String>,
    #[serde(default)]
    pub code2: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body for dependency-scanner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContentRequest {
    #[serde(default)]
    pub file_content: Option<String>,
}

/// Body for code-metrics-analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Body for summarize-text.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeTextRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Summary style: "paragraph" or "bullet".
    #[serde(default, rename = "type")]
    pub style: Option<String>,
    /// Summary length: "short", "medium", or "long".
    #[serde(default)]
    pub length: Option<String>,
}

/// Body for summarize-youtube.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeYoutubeRequest {
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default, rename = "type")]
    pub style: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

/// JSON body for summarize-content (the multipart variant carries a `file`
/// field instead).
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Response for code-metrics-analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    pub result: String,
}

/// Response envelope for summarize-text and summarize-youtube.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(rename = "type")]
    pub style: String,
    pub length: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
}

/// Response for summarize-content.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSummaryResponse {
    pub summary: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}
