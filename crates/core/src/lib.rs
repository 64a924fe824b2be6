//! Core domain engine: candle aggregation, ingestion orchestration, and
//! portfolio valuation.
//!
//! This crate is storage- and provider-agnostic. Exchange access comes in
//! through [`coinfolio_market_data::CandleProvider`] and persistence goes out
//! through the [`candles::CandleStore`] trait; concrete backends live in
//! sibling crates.

pub mod candles;
pub mod constants;
pub mod errors;
pub mod ingestion;
pub mod portfolio;

pub use candles::{aggregate, Candle, CandleStore, TimeRange};
pub use errors::{DatabaseError, Error, Result};
pub use ingestion::{FailedRange, IngestOptions, IngestionReport, IngestionService};
pub use portfolio::{Holdings, Position, PortfolioValuationService};

// The interval vocabulary is shared with providers, so it lives in the
// market-data crate; re-exported here for downstream convenience.
pub use coinfolio_market_data::{Interval, ParseIntervalError};
