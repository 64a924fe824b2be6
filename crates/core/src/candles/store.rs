//! Candle storage trait.
//!
//! This trait abstracts the persistence layer so storage backends can be
//! swapped; the `coinfolio-storage-sqlite` crate provides the Diesel/SQLite
//! implementation. It is the only shared mutable resource the engines touch,
//! and implementations must accept concurrent batch inserts - either by
//! serializing internally or because batches are disjoint by key.

use async_trait::async_trait;

use super::Candle;
use crate::errors::Result;

/// Storage interface for candle rows.
#[async_trait]
pub trait CandleStore: Send + Sync {
    /// Insert a batch of candles as one atomic write.
    ///
    /// Idempotent by `(symbol, open_time)`: re-inserting an existing key
    /// upserts the row and never corrupts the unique-key invariant.
    ///
    /// Returns the number of rows written.
    async fn insert_batch(&self, candles: &[Candle]) -> Result<usize>;

    /// Candles for `symbol` with `open_time` within `[start_ms, end_ms]`
    /// (both bounds inclusive), ascending by open time, capped at `limit`
    /// rows when given.
    async fn query(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Candle>>;
}
