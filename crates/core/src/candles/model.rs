//! Domain candle model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinfolio_market_data::Candle as ProviderCandle;

/// One OHLCV record for a symbol over a fixed time bucket.
///
/// Candles of one symbol and interval form a strictly time-ordered,
/// non-overlapping sequence; `(symbol, open_time)` is the unique key.
/// Invariants carried by every well-formed candle: `close_time > open_time`,
/// prices positive, volume non-negative, `high >= max(open, close, low)` and
/// `low <= min(open, close, high)`. Candles are never mutated in place -
/// aggregation and synthesis always produce new values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Owning symbol, or the `"PORTFOLIO"` marker for synthetic candles.
    pub symbol: String,

    /// Bucket start, inclusive (ms since epoch).
    pub open_time: i64,

    /// Bucket end, inclusive (ms since epoch).
    pub close_time: i64,

    /// Price at bucket open.
    pub open: Decimal,

    /// Highest trade price in the bucket.
    pub high: Decimal,

    /// Lowest trade price in the bucket.
    pub low: Decimal,

    /// Price at bucket close.
    pub close: Decimal,

    /// Base-asset volume traded in the bucket.
    pub volume: Decimal,

    /// Number of trades in the bucket.
    pub trade_count: i64,
}

impl Candle {
    /// File a provider candle under the symbol it was requested for.
    pub fn from_provider(symbol: impl Into<String>, candle: ProviderCandle) -> Self {
        Self {
            symbol: symbol.into(),
            open_time: candle.open_time,
            close_time: candle.close_time,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            trade_count: candle.trade_count,
        }
    }
}
