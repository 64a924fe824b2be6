//! Coinfolio Market Data Crate
//!
//! Exchange-facing candle fetching for the coinfolio engine.
//!
//! # Overview
//!
//! This crate covers everything between the domain engines and the exchange
//! HTTP APIs:
//!
//! - the [`CandleProvider`] trait one implements per exchange
//! - the Binance / Binance.US kline client
//! - a registry mapping exchange identifiers onto provider instances
//! - retry classification and the bounded-backoff retry driver
//! - a TTL'd per-provider symbol-list cache
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Domain Layer   | --> | ProviderRegistry |  (exchange id -> provider)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  CandleProvider  |  (Binance, Binance.US)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      Candle      |  (OHLCV, symbol-less)
//!                          +------------------+
//! ```
//!
//! Providers return candles without a symbol attached; the consuming layer
//! files each batch under the symbol it asked for.

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod symbols;

pub use errors::{fetch_with_retry, MarketDataError, RetryClass, RetryPolicy};
pub use models::{Candle, Interval, ParseIntervalError};
pub use provider::binance::BinanceProvider;
pub use provider::{CandleProvider, ProviderCapabilities, RateLimit};
pub use registry::ProviderRegistry;
pub use symbols::SymbolCache;
