//! Error types and retry classification for the market data crate.
//!
//! Every provider fault is a [`MarketDataError`] variant, and every variant
//! maps to a [`RetryClass`] that tells the retry driver whether another
//! attempt can help. The errors are `Clone` so ingestion reports can keep the
//! typed failure for a sub-range after the fetch result has been consumed.

mod retry;

pub use retry::{fetch_with_retry, RetryClass, RetryPolicy};

use thiserror::Error;

/// Errors that can occur while talking to an exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Transport-level failure or non-success HTTP status from the provider.
    #[error("provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error.
        provider: String,
        /// The error message from the provider or transport.
        message: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("rate limited by {provider}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
    },

    /// The provider answered but the payload could not be decoded.
    #[error("failed to parse {provider} response: {message}")]
    ParseFailed {
        /// The provider whose payload failed to decode.
        provider: String,
        /// What went wrong during decoding.
        message: String,
    },

    /// The requested interval is not in the provider's supported set.
    /// Checked against capability metadata before any fetch happens.
    #[error("interval {interval} is not supported by {provider}")]
    UnsupportedInterval {
        /// The provider that lacks the interval.
        provider: String,
        /// The rejected interval wire code.
        interval: String,
    },
}

impl MarketDataError {
    /// How the retry driver should respond to this error.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            MarketDataError::ProviderError { .. } => RetryClass::Transient,
            MarketDataError::ParseFailed { .. } => RetryClass::Transient,
            MarketDataError::RateLimited { .. } => RetryClass::Throttled,
            MarketDataError::UnsupportedInterval { .. } => RetryClass::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_is_transient() {
        let err = MarketDataError::ProviderError {
            provider: "BINANCE".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(err.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_parse_failure_is_transient() {
        let err = MarketDataError::ParseFailed {
            provider: "BINANCE".to_string(),
            message: "unexpected token".to_string(),
        };
        assert_eq!(err.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_rate_limited_is_throttled() {
        let err = MarketDataError::RateLimited {
            provider: "BINANCE_US".to_string(),
        };
        assert_eq!(err.retry_class(), RetryClass::Throttled);
    }

    #[test]
    fn test_unsupported_interval_is_never_retried() {
        let err = MarketDataError::UnsupportedInterval {
            provider: "BINANCE_US".to_string(),
            interval: "1s".to_string(),
        };
        assert_eq!(err.retry_class(), RetryClass::Never);
    }
}
