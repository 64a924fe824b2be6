//! Market data models.
//!
//! - `candle` - provider-side OHLCV record (no symbol attached)
//! - `interval` - candle bucket durations with wire codes and millisecond
//!   lengths

mod candle;
mod interval;

pub use candle::Candle;
pub use interval::{Interval, ParseIntervalError};
