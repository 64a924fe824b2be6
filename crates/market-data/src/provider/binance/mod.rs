//! Binance and Binance.US kline client.
//!
//! # API Endpoints
//!
//! - Klines: `{base}/klines?symbol=..&interval=..&startTime=..&endTime=..&limit=..`
//! - Symbol list: `{base}/exchangeInfo`
//!
//! # Response Format
//!
//! The klines endpoint returns an array of 12-element arrays:
//!
//! ```text
//! [ openTime, open, high, low, close, volume,
//!   closeTime, quoteVolume, tradeCount, takerBase, takerQuote, ignore ]
//! ```
//!
//! Prices and volumes arrive as decimal strings and are parsed exactly; rows
//! that fail to parse are skipped with a warning rather than failing the
//! whole batch. The `endTime` wire parameter is inclusive, so the half-open
//! fetch window is translated by passing `end_ms - 1` and parsed rows are
//! additionally clipped to `[start_ms, end_ms)`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{Candle, Interval};
use crate::provider::{CandleProvider, ProviderCapabilities, RateLimit};

const BINANCE_BASE_URL: &str = "https://api.binance.com/api/v3";
const BINANCE_US_BASE_URL: &str = "https://api.binance.us/api/v3";

/// Per-request kline cap shared by both Binance deployments.
const MAX_CANDLES_PER_REQUEST: u32 = 500;

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Binance.com accepts every interval we know about.
const BINANCE_INTERVALS: &[Interval] = &Interval::ALL;

/// Binance.US lacks the one-second interval.
const BINANCE_US_INTERVALS: &[Interval] = &[
    Interval::OneMinute,
    Interval::ThreeMinutes,
    Interval::FiveMinutes,
    Interval::FifteenMinutes,
    Interval::ThirtyMinutes,
    Interval::OneHour,
    Interval::TwoHours,
    Interval::FourHours,
    Interval::SixHours,
    Interval::EightHours,
    Interval::TwelveHours,
    Interval::OneDay,
    Interval::ThreeDays,
    Interval::OneWeek,
    Interval::OneMonth,
];

/// Response from the exchangeInfo endpoint, trimmed to what we use.
#[derive(Debug, Deserialize)]
struct ExchangeInfoResponse {
    symbols: Vec<ExchangeSymbol>,
}

#[derive(Debug, Deserialize)]
struct ExchangeSymbol {
    symbol: String,
    status: String,
}

/// Kline client for the Binance family of exchanges.
///
/// The two deployments share wire format and limits and differ only in base
/// URL and interval coverage, so one client type covers both.
pub struct BinanceProvider {
    client: Client,
    id: &'static str,
    base_url: &'static str,
    intervals: &'static [Interval],
}

impl BinanceProvider {
    /// Client for Binance.com.
    pub fn binance() -> Self {
        Self::with_base("BINANCE", BINANCE_BASE_URL, BINANCE_INTERVALS)
    }

    /// Client for Binance.US.
    pub fn binance_us() -> Self {
        Self::with_base("BINANCE_US", BINANCE_US_BASE_URL, BINANCE_US_INTERVALS)
    }

    fn with_base(id: &'static str, base_url: &'static str, intervals: &'static [Interval]) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            id,
            base_url,
            intervals,
        }
    }

    fn provider_error(&self, message: impl Into<String>) -> MarketDataError {
        MarketDataError::ProviderError {
            provider: self.id.to_string(),
            message: message.into(),
        }
    }

    fn parse_error(&self, message: impl Into<String>) -> MarketDataError {
        MarketDataError::ParseFailed {
            provider: self.id.to_string(),
            message: message.into(),
        }
    }

    /// GET `url` and return the body, mapping throttling and HTTP failures
    /// to their typed errors.
    async fn fetch(&self, url: &str) -> Result<String, MarketDataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: self.id.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(self.provider_error(format!("HTTP error: {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| self.provider_error(e.to_string()))
    }

    /// Decode one 12-element kline row. Returns `None` when a field is
    /// missing or malformed; the caller logs and skips such rows.
    fn parse_kline(row: &[Value]) -> Option<Candle> {
        if row.len() < 9 {
            return None;
        }

        let decimal_at = |idx: usize| -> Option<Decimal> {
            Decimal::from_str(row.get(idx)?.as_str()?).ok()
        };

        Some(Candle {
            open_time: row.first()?.as_i64()?,
            close_time: row.get(6)?.as_i64()?,
            open: decimal_at(1)?,
            high: decimal_at(2)?,
            low: decimal_at(3)?,
            close: decimal_at(4)?,
            volume: decimal_at(5)?,
            trade_count: row.get(8)?.as_i64()?,
        })
    }
}

#[async_trait]
impl CandleProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            max_candles_per_request: MAX_CANDLES_PER_REQUEST,
            supported_intervals: self.intervals,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: 1200,
            max_concurrency: 5,
            min_delay: Duration::from_millis(50),
        }
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>, MarketDataError> {
        if !self.capabilities().supports_interval(interval) {
            return Err(MarketDataError::UnsupportedInterval {
                provider: self.id.to_string(),
                interval: interval.to_string(),
            });
        }

        // The wire endTime is inclusive; our window is half-open.
        let url = format!(
            "{}/klines?symbol={}&interval={}&startTime={}&endTime={}&limit={}",
            self.base_url,
            symbol,
            interval,
            start_ms,
            end_ms - 1,
            MAX_CANDLES_PER_REQUEST
        );

        let body = self.fetch(&url).await?;
        let rows: Vec<Vec<Value>> =
            serde_json::from_str(&body).map_err(|e| self.parse_error(e.to_string()))?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            match Self::parse_kline(row) {
                Some(candle) if candle.open_time >= start_ms && candle.open_time < end_ms => {
                    candles.push(candle);
                }
                Some(_) => {} // outside the requested window
                None => warn!("{}: skipping malformed kline row: {:?}", self.id, row),
            }
        }

        candles.sort_by_key(|c| c.open_time);
        Ok(candles)
    }

    async fn fetch_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let url = format!("{}/exchangeInfo", self.base_url);
        let body = self.fetch(&url).await?;
        let info: ExchangeInfoResponse =
            serde_json::from_str(&body).map_err(|e| self.parse_error(e.to_string()))?;

        Ok(info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| s.symbol)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_row(open_time: i64) -> Vec<Value> {
        serde_json::from_str(&format!(
            r#"[{open_time}, "50000.10", "50100.00", "49900.50", "50050.25",
                "12.34567890", {}, "617000.12", 1234, "6.0", "300000.0", "0"]"#,
            open_time + 59_999
        ))
        .unwrap()
    }

    #[test]
    fn test_provider_ids() {
        assert_eq!(BinanceProvider::binance().id(), "BINANCE");
        assert_eq!(BinanceProvider::binance_us().id(), "BINANCE_US");
    }

    #[test]
    fn test_capabilities_cap_and_intervals() {
        let binance = BinanceProvider::binance();
        let caps = binance.capabilities();
        assert_eq!(caps.max_candles_per_request, 500);
        assert!(caps.supports_interval(Interval::OneSecond));

        let us_caps = BinanceProvider::binance_us().capabilities();
        assert!(!us_caps.supports_interval(Interval::OneSecond));
        assert!(us_caps.supports_interval(Interval::OneMinute));
    }

    #[test]
    fn test_rate_limit() {
        let rate = BinanceProvider::binance().rate_limit();
        assert_eq!(rate.requests_per_minute, 1200);
    }

    #[test]
    fn test_parse_kline_decodes_decimal_strings_exactly() {
        let candle = BinanceProvider::parse_kline(&sample_row(1_600_000_000_000)).unwrap();
        assert_eq!(candle.open_time, 1_600_000_000_000);
        assert_eq!(candle.close_time, 1_600_000_059_999);
        assert_eq!(candle.open, dec!(50000.10));
        assert_eq!(candle.high, dec!(50100.00));
        assert_eq!(candle.low, dec!(49900.50));
        assert_eq!(candle.close, dec!(50050.25));
        assert_eq!(candle.volume, dec!(12.34567890));
        assert_eq!(candle.trade_count, 1234);
    }

    #[test]
    fn test_parse_kline_rejects_short_rows() {
        let row: Vec<Value> = serde_json::from_str("[1600000000000, \"1.0\"]").unwrap();
        assert!(BinanceProvider::parse_kline(&row).is_none());
    }

    #[test]
    fn test_parse_kline_rejects_non_numeric_price() {
        let mut row = sample_row(1_600_000_000_000);
        row[1] = Value::String("not-a-price".to_string());
        assert!(BinanceProvider::parse_kline(&row).is_none());
    }

    #[tokio::test]
    async fn test_fetch_candles_rejects_unsupported_interval() {
        let provider = BinanceProvider::binance_us();
        let err = provider
            .fetch_candles("BTCUSDT", Interval::OneSecond, 0, 60_000)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::UnsupportedInterval { .. }));
    }

    #[test]
    fn test_exchange_info_deserialization_keeps_trading_only() {
        let json = r#"{
            "timezone": "UTC",
            "symbols": [
                {"symbol": "BTCUSDT", "status": "TRADING", "baseAsset": "BTC"},
                {"symbol": "OLDCOIN", "status": "BREAK", "baseAsset": "OLD"}
            ]
        }"#;
        let info: ExchangeInfoResponse = serde_json::from_str(json).unwrap();
        let trading: Vec<_> = info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| s.symbol)
            .collect();
        assert_eq!(trading, vec!["BTCUSDT".to_string()]);
    }
}
