//! SQLite storage implementation for coinfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the `CandleStore` trait defined in
//! `coinfolio-core` and contains:
//! - Database connection pooling and pragmas
//! - Diesel migrations
//! - The candle repository with its single-writer actor
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod candles;
pub mod db;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export the repository and storage errors
pub use candles::CandleRepository;
pub use errors::{IntoCore, StorageError};

// Re-export from coinfolio-core for convenience
pub use coinfolio_core::errors::{DatabaseError, Error, Result};
