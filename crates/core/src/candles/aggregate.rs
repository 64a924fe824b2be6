//! Downsampling of fixed-interval candle series.
//!
//! Windows are anchored at the first (sorted) candle's open time and consume
//! a fixed count of consecutive base candles - they are NOT re-bucketed by
//! timestamp value and NOT calendar-aligned. Gaps in the base series
//! therefore shift window boundaries rather than leaving empty windows;
//! changing this would change every aggregated value's time bucketing.

use crate::candles::Candle;
use crate::errors::{Error, Result};
use coinfolio_market_data::Interval;

/// Aggregate a base-resolution series into `target`-interval windows.
///
/// All input candles are expected to share one symbol; they are sorted by
/// open time before windowing, so the caller's ordering does not matter.
/// Each emitted window folds `target.millis() / base.millis()` consecutive
/// candles: open from the first, close from the last, high/low as exact
/// max/min, volume and trade count summed. Its `open_time` is the first
/// constituent's open time and `close_time` is `open_time +
/// target.millis() - 1`. A tail shorter than the full quotient is still
/// emitted from whatever candles remain.
///
/// Equal intervals are an identity (modulo sorting); empty input yields
/// empty output. Fails with [`Error::IncompatibleIntervals`] when
/// `target.millis()` is not an integer multiple of `base.millis()`,
/// including every target smaller than base.
pub fn aggregate(mut candles: Vec<Candle>, target: Interval, base: Interval) -> Result<Vec<Candle>> {
    if !target.is_aggregable_from(base) {
        return Err(Error::IncompatibleIntervals(format!(
            "target {} is not a multiple of base {}",
            target, base
        )));
    }

    candles.sort_by_key(|c| c.open_time);

    if candles.is_empty() || target == base {
        return Ok(candles);
    }

    let window = (target.millis() / base.millis()) as usize;
    let mut aggregated = Vec::with_capacity(candles.len().div_ceil(window));

    for chunk in candles.chunks(window) {
        let first = &chunk[0];
        let last = &chunk[chunk.len() - 1];

        let mut high = first.high;
        let mut low = first.low;
        let mut volume = first.volume;
        let mut trade_count = first.trade_count;
        for candle in &chunk[1..] {
            high = high.max(candle.high);
            low = low.min(candle.low);
            volume += candle.volume;
            trade_count += candle.trade_count;
        }

        aggregated.push(Candle {
            symbol: first.symbol.clone(),
            open_time: first.open_time,
            close_time: first.open_time + target.millis() - 1,
            open: first.open,
            high,
            low,
            close: last.close,
            volume,
            trade_count,
        });
    }

    Ok(aggregated)
}
