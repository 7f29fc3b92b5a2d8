//! Handler failure surface.
//!
//! Validation failures return plain-text 400s naming the field; upstream
//! failures are mapped onto the JSON error envelope the frontend expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::llm::LlmError;

/// Errors a handler can surface to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request field is absent or empty. No upstream call was made.
    #[error("{0}")]
    MissingField(String),

    /// The request body is present but unusable (bad URL, binary upload, ...).
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream LLM failure, surfaced after the retry wrapper gave up.
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// JSON error envelope.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingField(message) | ApiError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ApiError::Llm(err) => {
                let (status, label, retry_after) = match &err {
                    LlmError::RateLimited { .. } => {
                        (StatusCode::TOO_MANY_REQUESTS, "API Rate Limited", Some(60))
                    }
                    LlmError::Timeout { .. } => {
                        (StatusCode::GATEWAY_TIMEOUT, "Request Timeout", None)
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "Processing Error", None),
                };
                let body = ErrorBody {
                    error: label,
                    message: err.to_string(),
                    retry_after,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_429() {
        let err = ApiError::Llm(LlmError::RateLimited {
            message: "slow down".to_string(),
            retry_after: None,
        });
        assert_eq!(err.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn rate_limit_envelope_carries_fixed_retry_after() {
        let body = ErrorBody {
            error: "API Rate Limited",
            message: "slow down".to_string(),
            retry_after: Some(60),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["retryAfter"], 60);
        assert_eq!(value["error"], "API Rate Limited");
    }

    #[test]
    fn envelope_omits_retry_after_when_absent() {
        let body = ErrorBody {
            error: "Processing Error",
            message: "boom".to_string(),
            retry_after: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("retryAfter").is_none());
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let err = ApiError::Llm(LlmError::Timeout {
            message: "deadline exceeded".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn malformed_response_maps_to_internal_error() {
        let err = ApiError::Llm(LlmError::MalformedResponse);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_field_is_plain_bad_request() {
        let err = ApiError::MissingField("Language is required".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
