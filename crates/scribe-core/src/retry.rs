//! Bounded retry with per-attempt timeouts for remote AI calls.
//!
//! Every outbound generation call goes through [`RetryPolicy::execute`],
//! which races each attempt against a deadline and sleeps an exponentially
//! growing delay between failures. Callers get back either the first
//! successful value or a single [`Error::RetryExhausted`] describing the
//! last failure.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::defaults;
use crate::error::{Error, Result};

/// Retry schedule for outbound AI calls.
///
/// Defaults to 3 attempts, a 10 second deadline per attempt, and a 1 second
/// backoff base (delays of 1s then 2s between the three attempts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Deadline applied to each attempt individually.
    pub attempt_timeout: Duration,
    /// Base delay; attempt `n` failing waits `backoff_base * 2^(n-1)`.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::AI_MAX_ATTEMPTS,
            attempt_timeout: Duration::from_secs(defaults::AI_ATTEMPT_TIMEOUT_SECS),
            backoff_base: Duration::from_millis(defaults::AI_BACKOFF_BASE_MS),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after attempt `attempt` (1-based) fails.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.pow(attempt.saturating_sub(1))
    }

    /// Run `f` up to `max_attempts` times, bounding each attempt by
    /// `attempt_timeout`.
    ///
    /// Any error fails the attempt, including a timeout, which is recorded
    /// as [`Error::Timeout`]. Between failed attempts the task sleeps
    /// `backoff_base * 2^(attempt-1)`; there is no sleep after the final
    /// attempt. When all attempts fail the returned error is
    /// [`Error::RetryExhausted`] carrying the last failure's message.
    pub async fn execute<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 1..=self.max_attempts {
            match tokio::time::timeout(self.attempt_timeout, f()).await {
                Ok(Ok(value)) => {
                    if attempt > 1 {
                        debug!(op = operation, attempt, "call succeeded after retry");
                    }
                    return Ok(value);
                }
                Ok(Err(err)) => {
                    warn!(op = operation, attempt, error = %err, "call attempt failed");
                    last_error = Some(err);
                }
                Err(_) => {
                    let err = Error::Timeout {
                        operation: operation.to_string(),
                        secs: self.attempt_timeout.as_secs(),
                    };
                    warn!(op = operation, attempt, error = %err, "call attempt timed out");
                    last_error = Some(err);
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.backoff_delay(attempt)).await;
            }
        }

        let message = match last_error {
            Some(err) => err.to_string(),
            None => "no attempts were made".to_string(),
        };
        error!(
            op = operation,
            attempts = self.max_attempts,
            error = %message,
            "call failed after all attempts"
        );
        Err(Error::RetryExhausted {
            operation: operation.to_string(),
            attempts: self.max_attempts,
            message,
        })
    }
}
