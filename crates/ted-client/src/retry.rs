use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between attempts, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// How transient transport failures are retried.
///
/// Only errors whose [`crate::TransportError::is_retryable`] is true are
/// retried. API errors (`ok: false`) never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `0` disables retrying.
    pub max_retries: u32,
    /// Fixed pause before each retry.
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// A policy that surfaces the first failure.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay_ms: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Total attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Execute `request`, retrying transient failures according to `policy`.
///
/// The sleep between attempts only suspends the calling task.
pub(crate) async fn execute_with_retry(
    client: &dyn HttpClient,
    request: &HttpRequest,
    policy: RetryPolicy,
    method: &str,
) -> Result<HttpResponse> {
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match client.execute(request).await {
            Ok(response) => {
                debug!(method, attempts, status = response.status, "request completed");
                return Ok(response);
            }
            Err(err) if err.is_retryable() && attempts < policy.max_attempts() => {
                warn!(
                    method,
                    attempt = attempts,
                    max_attempts = policy.max_attempts(),
                    error = %err,
                    "transient transport error, retrying"
                );
                tokio::time::sleep(policy.delay()).await;
            }
            Err(source) => return Err(Error::Transport { attempts, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_allows_four_attempts_one_second_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay(), Duration::from_secs(1));
    }

    #[test]
    fn none_disables_retrying() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay(), Duration::ZERO);
    }

    #[test]
    fn new_converts_delay() {
        let policy = RetryPolicy::new(5, Duration::from_millis(250));
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.delay_ms, 250);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let policy: RetryPolicy = serde_yaml::from_str("max_retries: 1").unwrap();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.delay_ms, DEFAULT_RETRY_DELAY_MS);
    }
}
