//! Candle domain: model, time ranges, aggregation, storage boundary.
//!
//! - `model` - the domain [`Candle`] record
//! - `range` - half-open [`TimeRange`] and partitioning
//! - `aggregate` - downsampling into coarser intervals
//! - `store` - the [`CandleStore`] persistence trait

mod aggregate;
mod model;
mod range;
mod store;

pub use aggregate::aggregate;
pub use model::Candle;
pub use range::TimeRange;
pub use store::CandleStore;
