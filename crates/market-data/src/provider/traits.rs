//! Candle provider trait definition.
//!
//! One implementation per exchange. The registry maps exchange identifiers
//! onto boxed implementations of this trait, so adding an exchange means
//! implementing it and registering the instance - no dispatch hierarchy.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Candle, Interval};

use super::capabilities::{ProviderCapabilities, RateLimit};

/// A single exchange's market data API.
///
/// # Contract
///
/// `fetch_candles` must return candles clipped to the half-open window
/// `[start_ms, end_ms)`, ordered by open time ascending. A window with no
/// data yields an empty vector, never an error; errors mean the request
/// itself failed (transport, parse, throttling).
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Unique exchange identifier, e.g. `"BINANCE"` or `"BINANCE_US"`.
    ///
    /// Used for registry lookup, logging, and error attribution.
    fn id(&self) -> &'static str;

    /// Static capability metadata, consulted before fetching.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Rate limiting configuration for this exchange.
    fn rate_limit(&self) -> RateLimit;

    /// Fetch candles for one symbol at one interval within
    /// `[start_ms, end_ms)` milliseconds since epoch.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Fetch the exchange's currently tradable symbol list.
    async fn fetch_symbols(&self) -> Result<Vec<String>, MarketDataError>;
}
