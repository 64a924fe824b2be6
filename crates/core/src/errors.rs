//! Core error types for the coinfolio engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer; provider faults arrive via `MarketDataError` after the retry budget
//! is spent.

use thiserror::Error;

use coinfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// The first four variants are caller bugs or unfulfillable requests and are
/// never retried; `MarketData` and `Database` wrap I/O faults from the
/// collaborating layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed time range (start >= end, non-positive span).
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    /// Target interval is not an integer multiple of the base interval.
    #[error("Incompatible intervals: {0}")]
    IncompatibleIntervals(String),

    /// No usable candle exists for a required price lookup or asset series.
    /// Retrying will not manufacture historical data.
    #[error("No price data: {0}")]
    NoPriceData(String),

    /// Bad caller input (empty positions, weight or capital out of range).
    #[error("Input validation failed: {0}")]
    Validation(String),

    /// Provider fault, surfaced after the retry budget was exhausted.
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// Store fault, converted from the storage layer's own error type.
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, r2d2, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g. duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
