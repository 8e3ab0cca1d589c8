//! Bounded retry with exponential backoff.
//!
//! The policy is data; whether an error is worth another attempt is decided by
//! the error type through [`Retryable`]. [`retry`] drives any async attempt
//! closure, so it knows nothing about HTTP or image generation.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait before attempt `n + 1` is `backoff_base_secs ^ n` seconds.
    pub backoff_base_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_secs: 2,
        }
    }
}

impl RetryPolicy {
    /// Backoff after the zero-based `attempt` failed.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.backoff_base_secs.saturating_pow(attempt))
    }
}

pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// policy's attempts are used up. The closure receives the zero-based attempt
/// number. No sleep follows the final attempt.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => {
                error!(attempt, error = %e, "Attempt failed with non-retryable error");
                return Err(e);
            }
            Err(e) if attempt + 1 >= attempts => {
                error!(attempts, error = %e, "Retries exhausted");
                return Err(e);
            }
            Err(e) => {
                let wait = policy.backoff(attempt);
                warn!(
                    attempt,
                    wait_secs = wait.as_secs(),
                    error = %e,
                    "Attempt failed, backing off before retry"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}
