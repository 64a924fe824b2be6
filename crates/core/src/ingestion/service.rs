//! Candle ingestion orchestration.
//!
//! # Architecture
//!
//! ```text
//! IngestionService
//!       │
//!       ├─► TimeRange::partition (provider-bounded fetch windows)
//!       ├─► CandleProvider (concurrent sub-range fetches, retried)
//!       └─► CandleStore (one atomic batch write per completed fetch)
//! ```
//!
//! # Key Design Principles
//!
//! - **Side-effect-free mapping**: each concurrent task only fetches and
//!   yields `(range, Result<batch>)`; persistence happens in the sequential
//!   reduction loop that drains the stream, so peak memory stays bounded by
//!   the concurrency limit and large ranges are never held fully in memory.
//! - **Best-effort**: a sub-range that fails after retries is recorded and
//!   does not abort its siblings; partial success is a reportable outcome,
//!   not a fatal error, and already-persisted batches stay committed.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use coinfolio_market_data::{
    fetch_with_retry, CandleProvider, Interval, MarketDataError, RetryPolicy,
};

use crate::candles::{Candle, CandleStore, TimeRange};
use crate::constants::DEFAULT_MAX_CONCURRENT_FETCHES;
use crate::errors::Result;

/// Tuning knobs for one ingestion run.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// Bound on in-flight sub-range fetches.
    pub max_concurrent_fetches: usize,

    /// Retry budget applied to every sub-range fetch.
    pub retry: RetryPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            retry: RetryPolicy::default(),
        }
    }
}

/// A sub-range whose fetch failed after the retry budget was spent.
#[derive(Clone, Debug)]
pub struct FailedRange {
    /// The fetch window that could not be filled.
    pub range: TimeRange,
    /// The final typed provider error.
    pub error: MarketDataError,
}

/// Aggregate outcome of one ingestion run.
#[derive(Clone, Debug)]
pub struct IngestionReport {
    /// Symbol the run ingested.
    pub symbol: String,
    /// Interval the run ingested at.
    pub interval: Interval,
    /// Total candle rows written to the store.
    pub saved_count: usize,
    /// Sub-ranges that failed after retries, with their typed errors.
    pub failed_ranges: Vec<FailedRange>,
}

impl IngestionReport {
    fn new(symbol: &str, interval: Interval) -> Self {
        Self {
            symbol: symbol.to_string(),
            interval,
            saved_count: 0,
            failed_ranges: Vec::new(),
        }
    }

    /// Whether every sub-range was fetched and persisted.
    pub fn is_complete(&self) -> bool {
        self.failed_ranges.is_empty()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!(
                "Ingested {} candles for {} @ {}",
                self.saved_count, self.symbol, self.interval
            )
        } else {
            format!(
                "Ingested {} candles for {} @ {} with {} failed sub-ranges",
                self.saved_count,
                self.symbol,
                self.interval,
                self.failed_ranges.len()
            )
        }
    }
}

/// Orchestrates partition -> concurrent fetch -> persist for one
/// symbol/interval/time-range.
pub struct IngestionService<S: CandleStore> {
    store: Arc<S>,
    options: IngestOptions,
}

impl<S: CandleStore> IngestionService<S> {
    /// Service with default options.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_options(store, IngestOptions::default())
    }

    /// Service with caller-tuned concurrency and retry.
    pub fn with_options(store: Arc<S>, options: IngestOptions) -> Self {
        Self { store, options }
    }

    /// Fetch and persist all candles for `symbol` at `interval` within
    /// `range`, splitting the range so no single request asks the provider
    /// for more than `max_candles_per_request` candles.
    ///
    /// Sub-ranges may complete and persist in any order; the store upserts
    /// by `(symbol, open_time)` so disjoint batch writes are commutative.
    /// An empty fetch is skipped, a failed fetch lands in
    /// [`IngestionReport::failed_ranges`].
    pub async fn ingest(
        &self,
        provider: &dyn CandleProvider,
        symbol: &str,
        interval: Interval,
        range: TimeRange,
        max_candles_per_request: u32,
    ) -> Result<IngestionReport> {
        if !provider.capabilities().supports_interval(interval) {
            return Err(MarketDataError::UnsupportedInterval {
                provider: provider.id().to_string(),
                interval: interval.to_string(),
            }
            .into());
        }

        let span = i64::from(max_candles_per_request) * interval.millis();
        let sub_ranges = range.partition(span)?;

        info!(
            "ingesting {} @ {} from {}: {} sub-ranges of <= {} candles",
            symbol,
            interval,
            provider.id(),
            sub_ranges.len(),
            max_candles_per_request
        );

        let retry = &self.options.retry;
        let mut fetches = stream::iter(sub_ranges)
            .map(|sub| async move {
                let result = fetch_with_retry(retry, || {
                    provider.fetch_candles(symbol, interval, sub.start, sub.end)
                })
                .await;
                (sub, result)
            })
            .buffer_unordered(self.options.max_concurrent_fetches);

        let mut report = IngestionReport::new(symbol, interval);
        while let Some((sub, result)) = fetches.next().await {
            match result {
                Ok(batch) if batch.is_empty() => {
                    debug!("no data in [{}, {}), skipping", sub.start, sub.end);
                }
                Ok(batch) => {
                    let candles: Vec<Candle> = batch
                        .into_iter()
                        .map(|c| Candle::from_provider(symbol, c))
                        .collect();
                    let written = self.store.insert_batch(&candles).await?;
                    debug!("persisted {} candles for [{}, {})", written, sub.start, sub.end);
                    report.saved_count += written;
                }
                Err(error) => {
                    warn!(
                        "sub-range [{}, {}) failed after retries: {}",
                        sub.start, sub.end, error
                    );
                    report.failed_ranges.push(FailedRange { range: sub, error });
                }
            }
        }

        info!("{}", report.summary());
        Ok(report)
    }
}
