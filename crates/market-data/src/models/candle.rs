//! Provider-side candle model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV record as returned by a provider.
///
/// Providers answer for a single symbol per request, so the record carries no
/// symbol of its own; the consuming layer attaches one when it files the
/// candle under a domain series. Timestamps are milliseconds since epoch and
/// `close_time` is always greater than `open_time`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
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
