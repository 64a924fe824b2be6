//! Best-effort candle ingestion from exchange providers.

mod service;

pub use service::{FailedRange, IngestOptions, IngestionReport, IngestionService};
