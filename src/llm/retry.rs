//! Bounded retry with exponential backoff for rate-limited LLM calls.
//!
//! Only [`LlmError::RateLimited`] is retried; any other failure is returned
//! to the caller on the first attempt so a 400 or 500 from the provider
//! fails fast.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::LlmError;
use crate::config::Config;

/// Retry policy for upstream LLM calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of call attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each further attempt.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_backoff_ms),
        }
    }

    /// Backoff before retrying after the given 1-based attempt:
    /// `initial_delay * 2^(attempt-1)`.
    fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Invoke `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is exhausted. The last error is returned verbatim.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(value) => {
                debug!(attempt, "LLM call succeeded");
                return Ok(value);
            }
            Err(err @ LlmError::RateLimited { .. }) if attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Rate limited, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(attempt, error = %err, "LLM call failed, not retrying");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn rate_limited() -> LlmError {
        LlmError::RateLimited {
            message: "slow down".to_string(),
            retry_after: None,
        }
    }

    fn policy(max_attempts: u32, initial_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(initial_ms),
        }
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let p = policy(5, 1000);
        assert_eq!(p.delay_after(1), Duration::from_millis(1000));
        assert_eq!(p.delay_after(2), Duration::from_millis(2000));
        assert_eq!(p.delay_after(3), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_two_rate_limits() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let result = with_retry(&policy(3, 1000), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Second attempt after 1000ms, third after another 2000ms.
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn non_rate_limit_error_fails_on_first_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy(3, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(LlmError::Status {
                    status: 500,
                    message: "boom".to_string(),
                })
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match result.unwrap_err() {
            LlmError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_rate_limit_exhausts_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy(3, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(rate_limited()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result.unwrap_err(), LlmError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn malformed_response_is_not_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy(3, 10), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(LlmError::MalformedResponse) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result.unwrap_err(), LlmError::MalformedResponse));
    }
}
