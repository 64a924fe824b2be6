//! Exchange-facing provider layer.
//!
//! - `traits` - the [`CandleProvider`] contract every exchange implements
//! - `capabilities` - static per-exchange metadata and rate limits
//! - `binance` - Binance and Binance.US kline client

pub mod binance;
mod capabilities;
mod traits;

pub use capabilities::{ProviderCapabilities, RateLimit};
pub use traits::CandleProvider;
