//! OpenRouter integration: wire types, client, and the retry wrapper.

pub mod client;
pub mod retry;
pub mod types;

pub use client::{ChatBackend, OpenRouterClient};
pub use retry::{with_retry, RetryPolicy};

use thiserror::Error;

/// Failures of a single LLM call attempt.
///
/// Only `RateLimited` is retryable; everything else fails fast through the
/// retry wrapper.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP 429 from the provider.
    #[error("rate limited by provider: {message}")]
    RateLimited {
        message: String,
        /// Parsed `Retry-After` header, if the provider sent one.
        retry_after: Option<std::time::Duration>,
    },

    /// The upstream request timed out.
    #[error("upstream request timed out: {message}")]
    Timeout { message: String },

    /// Any other non-2xx provider response.
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response without a usable `choices[0].message.content`.
    #[error("invalid response structure: no completion choices")]
    MalformedResponse,

    /// Transport-level failure other than a timeout.
    #[error("network error: {0}")]
    Network(String),
}
