//! SQLite persistence for candles.

pub mod model;
pub mod repository;

pub use model::CandleDB;
pub use repository::CandleRepository;
