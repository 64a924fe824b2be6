//! Bounded retry with exponential backoff for provider calls.

use std::future::Future;
use std::time::Duration;

use log::warn;

use super::MarketDataError;

/// Classification for retry policy.
///
/// Determines how [`fetch_with_retry`] responds to an error from a provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry. The request is fundamentally invalid (e.g. an
    /// unsupported interval) and repeating it cannot succeed.
    Never,

    /// Transient fault (network hiccup, bad payload). Retry after the
    /// normal backoff.
    Transient,

    /// The provider asked us to slow down (HTTP 429). Retry, but wait
    /// considerably longer than for a plain transient fault.
    Throttled,
}

/// Bounds on the retry loop.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Backoff before the second attempt; doubles on each further attempt.
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Sleep duration after a failed `attempt` (1-based).
    fn backoff_for(&self, attempt: u32, class: RetryClass) -> Duration {
        let exp = self.base_backoff * 2u32.saturating_pow(attempt.saturating_sub(1));
        match class {
            RetryClass::Throttled => exp * 4,
            _ => exp,
        }
    }
}

/// Drives `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is exhausted. The final typed error is returned as-is so
/// the caller can still classify it.
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, MarketDataError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MarketDataError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let class = err.retry_class();
                if class == RetryClass::Never || attempt >= policy.max_attempts {
                    return Err(err);
                }
                let backoff = policy.backoff_for(attempt, class);
                warn!(
                    "attempt {}/{} failed ({}), retrying in {:?}",
                    attempt, policy.max_attempts, err, backoff
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
