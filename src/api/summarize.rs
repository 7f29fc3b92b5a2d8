//! Summarization handlers: raw text, YouTube videos, and uploaded files.

use std::sync::Arc;

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::Json;
use url::Url;

use super::error::ApiError;
use super::routes::AppState;
use super::tools::require;
use super::types::{
    ContentSummaryResponse, SummarizeContentRequest, SummarizeTextRequest,
    SummarizeYoutubeRequest, SummaryResponse,
};
use crate::prompts::Tool;
use crate::sanitize::strip_code_fences;

const DEFAULT_STYLE: &str = "paragraph";
const DEFAULT_LENGTH: &str = "medium";

/// Normalize the optional style/length fields to their defaults.
fn summary_params(style: Option<String>, length: Option<String>) -> (String, String) {
    let style = style
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let length = length
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LENGTH.to_string());
    (style, length)
}

pub async fn summarize_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeTextRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let text = require(req.text, "Text is required")?;
    let (style, length) = summary_params(req.style, req.length);

    let prompt = format!(
        "Provide a {} summary in {} style of the following text:\n\n{}",
        length, style, text
    );
    let raw = state.generate(Tool::Summarization, &prompt).await?;

    Ok(Json(SummaryResponse {
        summary: strip_code_fences(&raw),
        style,
        length,
        source: None,
    }))
}

pub async fn summarize_youtube(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeYoutubeRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let youtube_url = require(req.youtube_url, "YouTube URL is required")?;
    if !is_youtube_url(&youtube_url) {
        return Err(ApiError::InvalidInput(
            "A valid YouTube URL is required".to_string(),
        ));
    }
    let (style, length) = summary_params(req.style, req.length);

    let prompt = format!(
        "Provide a {} summary in {} style of the YouTube video at {}. \
         Base the summary on the video's publicly available transcript and description.",
        length, style, youtube_url
    );
    let raw = state.generate(Tool::Summarization, &prompt).await?;

    Ok(Json(SummaryResponse {
        summary: strip_code_fences(&raw),
        style,
        length,
        source: Some("youtube"),
    }))
}

/// Accepts either a multipart upload with a `file` field (UTF-8 text) or a
/// JSON body with a `content` field.
pub async fn summarize_content(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Json<ContentSummaryResponse>, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let content = if content_type.starts_with("multipart/form-data") {
        read_uploaded_file(req).await?
    } else {
        let Json(body) = Json::<SummarizeContentRequest>::from_request(req, &())
            .await
            .map_err(|e| ApiError::InvalidInput(format!("Invalid request body: {}", e)))?;
        require(body.content, "Content is required")?
    };

    let prompt = format!("Summarize the following document:\n\n{}", content);
    let raw = state.generate(Tool::Summarization, &prompt).await?;

    Ok(Json(ContentSummaryResponse {
        summary: strip_code_fences(&raw),
    }))
}

/// Pull the text out of the multipart `file` field.
///
/// Only UTF-8 text files are supported; OCR and PDF extraction are handled
/// by a separate media service.
async fn read_uploaded_file(req: Request) -> Result<String, ApiError> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Invalid multipart request: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Invalid multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidInput(format!("Failed to read upload: {}", e)))?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
            ApiError::InvalidInput("Only UTF-8 text files are supported".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(ApiError::MissingField("File is required".to_string()));
        }
        return Ok(text);
    }

    Err(ApiError::MissingField("File is required".to_string()))
}

/// Accept youtube.com (any subdomain) and youtu.be links.
fn is_youtube_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host_str() {
        Some(host) => {
            host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_youtube_urls() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_youtube_url("http://m.youtube.com/watch?v=abc"));
    }

    #[test]
    fn rejects_non_youtube_urls() {
        assert!(!is_youtube_url("https://vimeo.com/12345"));
        assert!(!is_youtube_url("https://notyoutube.com/watch"));
        assert!(!is_youtube_url("not a url"));
        assert!(!is_youtube_url("ftp://youtube.com/video"));
    }

    #[test]
    fn summary_params_fall_back_to_defaults() {
        let (style, length) = summary_params(None, Some("".to_string()));
        assert_eq!(style, "paragraph");
        assert_eq!(length, "medium");

        let (style, length) = summary_params(Some("bullet".to_string()), Some("short".to_string()));
        assert_eq!(style, "bullet");
        assert_eq!(length, "short");
    }
}
