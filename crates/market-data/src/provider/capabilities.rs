//! Provider capabilities and rate limiting configuration.

use std::time::Duration;

use crate::models::Interval;

/// Static description of what an exchange can serve.
///
/// Consulted before any fetch: callers size their request windows from
/// `max_candles_per_request` and reject intervals the exchange does not
/// understand instead of sending a doomed request.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Hard cap on candles returned by a single kline request.
    pub max_candles_per_request: u32,

    /// Intervals the exchange accepts in kline requests.
    pub supported_intervals: &'static [Interval],
}

impl ProviderCapabilities {
    /// Whether the exchange accepts `interval` in kline requests.
    pub fn supports_interval(&self, interval: Interval) -> bool {
        self.supported_intervals.contains(&interval)
    }
}

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call an exchange to avoid
/// hitting their limits and getting blocked.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Maximum concurrent requests to this provider.
    pub max_concurrency: usize,

    /// Minimum delay between requests.
    pub min_delay: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            max_concurrency: 5,
            min_delay: Duration::from_millis(100),
        }
    }
}
