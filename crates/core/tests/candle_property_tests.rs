//! Property-based integration tests for range partitioning and candle
//! aggregation.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use coinfolio_core::{aggregate, Candle, Interval, TimeRange};

const MINUTE_MS: i64 = 60_000;

// =============================================================================
// Generators
// =============================================================================

/// Generates a valid half-open time range up to roughly a year wide.
fn arb_time_range() -> impl Strategy<Value = TimeRange> {
    (0i64..1_700_000_000_000, 1i64..400 * 24 * 60)
        .prop_map(|(start, minutes)| TimeRange::new(start, start + minutes * MINUTE_MS).unwrap())
}

/// Generates a strictly increasing sequence of one-minute candles with the
/// given number of gaps knocked out.
fn arb_minute_candles() -> impl Strategy<Value = Vec<Candle>> {
    (1usize..200, proptest::collection::vec(any::<bool>(), 200)).prop_map(|(len, keep)| {
        (0..len)
            .filter(|i| *keep.get(*i).unwrap_or(&true))
            .map(|i| {
                let open_time = i as i64 * MINUTE_MS;
                let price = Decimal::from(100 + i as i64 % 17);
                Candle {
                    symbol: "BTCUSDT".to_string(),
                    open_time,
                    close_time: open_time + MINUTE_MS - 1,
                    open: price,
                    high: price + Decimal::from(i as i64 % 5),
                    low: price - Decimal::from(i as i64 % 3),
                    close: price + Decimal::ONE,
                    volume: Decimal::from(i as i64 % 11),
                    trade_count: i as i64 % 7,
                }
            })
            .collect()
    })
}

/// Generates an aggregable `(base, target)` interval pair.
fn arb_interval_pair() -> impl Strategy<Value = (Interval, Interval)> {
    prop_oneof![
        Just((Interval::OneMinute, Interval::FiveMinutes)),
        Just((Interval::OneMinute, Interval::FifteenMinutes)),
        Just((Interval::OneMinute, Interval::OneHour)),
        Just((Interval::FiveMinutes, Interval::FifteenMinutes)),
        Just((Interval::OneHour, Interval::OneDay)),
    ]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Partitioning a range must reproduce it exactly: sub-ranges are
    /// contiguous, non-overlapping, within the span cap, and cover
    /// `[start, end)` with nothing left over.
    #[test]
    fn prop_partition_reconstructs_range(range in arb_time_range(), chunks in 1i64..2000) {
        let max_span = chunks * MINUTE_MS;
        let parts = range.partition(max_span).unwrap();

        prop_assert!(!parts.is_empty());
        prop_assert_eq!(parts[0].start, range.start);
        prop_assert_eq!(parts[parts.len() - 1].end, range.end);
        for pair in parts.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        for part in &parts {
            prop_assert!(part.span_ms() <= max_span);
            prop_assert!(part.span_ms() > 0);
        }
    }

    /// Aggregation conserves volume and trade count: coarser candles
    /// describe the same trading activity, just in fewer rows.
    #[test]
    fn prop_aggregate_conserves_volume_and_trades(
        candles in arb_minute_candles(),
        pair in arb_interval_pair(),
    ) {
        let (base, target) = pair;
        let total_volume: Decimal = candles.iter().map(|c| c.volume).sum();
        let total_trades: i64 = candles.iter().map(|c| c.trade_count).sum();

        let aggregated = aggregate(candles, target, base).unwrap();

        let agg_volume: Decimal = aggregated.iter().map(|c| c.volume).sum();
        let agg_trades: i64 = aggregated.iter().map(|c| c.trade_count).sum();
        prop_assert_eq!(agg_volume, total_volume);
        prop_assert_eq!(agg_trades, total_trades);
    }

    /// Aggregating to the base interval itself is the identity, modulo
    /// sorting by open time.
    #[test]
    fn prop_aggregate_identity_at_same_interval(candles in arb_minute_candles()) {
        let mut expected = candles.clone();
        expected.sort_by_key(|c| c.open_time);

        let result = aggregate(candles, Interval::OneMinute, Interval::OneMinute).unwrap();
        prop_assert_eq!(result, expected);
    }

    /// Re-aggregating an already aggregated series at its own granularity
    /// changes nothing.
    #[test]
    fn prop_aggregate_idempotent_at_own_granularity(candles in arb_minute_candles()) {
        let once = aggregate(candles, Interval::FiveMinutes, Interval::OneMinute).unwrap();
        let twice =
            aggregate(once.clone(), Interval::FiveMinutes, Interval::FiveMinutes).unwrap();
        prop_assert_eq!(twice, once);
    }

    /// Every output candle's high is the max and low the min over its
    /// constituent window, and open/close come from the window's first and
    /// last candle.
    #[test]
    fn prop_aggregate_window_extremes(candles in arb_minute_candles()) {
        let mut sorted = candles.clone();
        sorted.sort_by_key(|c| c.open_time);
        let window = Interval::FiveMinutes.millis() / Interval::OneMinute.millis();

        let aggregated = aggregate(candles, Interval::FiveMinutes, Interval::OneMinute).unwrap();

        prop_assert_eq!(
            aggregated.len(),
            (sorted.len() + window as usize - 1) / window as usize
        );
        for (chunk, out) in sorted.chunks(window as usize).zip(&aggregated) {
            prop_assert_eq!(out.open_time, chunk[0].open_time);
            prop_assert_eq!(&out.open, &chunk[0].open);
            prop_assert_eq!(&out.close, &chunk[chunk.len() - 1].close);
            prop_assert_eq!(out.high, chunk.iter().map(|c| c.high).max().unwrap());
            prop_assert_eq!(out.low, chunk.iter().map(|c| c.low).min().unwrap());
            prop_assert_eq!(out.close_time, chunk[0].open_time + Interval::FiveMinutes.millis() - 1);
        }
    }

    /// Output candles stay sorted and unique by open time.
    #[test]
    fn prop_aggregate_output_sorted(
        candles in arb_minute_candles(),
        pair in arb_interval_pair(),
    ) {
        let (base, target) = pair;
        let aggregated = aggregate(candles, target, base).unwrap();
        for pair in aggregated.windows(2) {
            prop_assert!(pair[0].open_time < pair[1].open_time);
        }
    }
}
