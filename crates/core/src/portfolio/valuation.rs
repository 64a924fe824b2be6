//! Portfolio value-trajectory simulation.
//!
//! # Architecture
//!
//! ```text
//! PortfolioValuationService
//!       │
//!       ├─► CandleStore (entry-price lookups, per-asset series)
//!       ├─► synthesize   (quantity-scaled, component-wise merge)
//!       └─► aggregate    (base resolution -> caller's target interval)
//! ```
//!
//! The simulation buys each position at the range start with
//! `capital * weight`, holds the resulting quantities unchanged, and prices
//! the basket at every base-resolution timestamp any constituent traded at.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use coinfolio_market_data::Interval;

use crate::candles::{aggregate, Candle, CandleStore, TimeRange};
use crate::constants::{
    ENTRY_PRICE_TOLERANCE_MS, ENTRY_PRICE_WIDE_TOLERANCE_MS, HOLDINGS_SCALE, PORTFOLIO_SYMBOL,
};
use crate::errors::{Error, Result};

use super::model::{Holdings, Position};

/// Simulates the value trajectory of a weighted multi-asset portfolio.
pub struct PortfolioValuationService<S: CandleStore> {
    store: Arc<S>,
    base_interval: Interval,
}

impl<S: CandleStore> PortfolioValuationService<S> {
    /// Service over `store`, whose rows are at `base_interval` resolution.
    pub fn new(store: Arc<S>, base_interval: Interval) -> Self {
        Self {
            store,
            base_interval,
        }
    }

    /// Compute the portfolio's value trajectory over `range`, one candle per
    /// `target_interval`.
    ///
    /// Derives initial holdings from entry prices at the range start, merges
    /// every constituent's base-resolution series into one synthetic
    /// `"PORTFOLIO"` series, and aggregates that to the target interval.
    pub async fn valuate(
        &self,
        positions: &[Position],
        total_capital: Decimal,
        range: TimeRange,
        target_interval: Interval,
    ) -> Result<Vec<Candle>> {
        let holdings = self
            .initial_holdings(positions, total_capital, range.start)
            .await?;
        let series = self.fetch_asset_series(&holdings, range).await?;
        let synthetic = synthesize(&holdings, &series, range, self.base_interval);
        aggregate(synthetic, target_interval, self.base_interval)
    }

    /// Derive the quantity of each asset bought at the range start.
    ///
    /// `quantity = capital * weight / entry_price`, rounded to exactly
    /// 8 fractional digits half-up. The precision and rounding mode are a
    /// hard compatibility requirement, not an implementation detail.
    pub async fn initial_holdings(
        &self,
        positions: &[Position],
        total_capital: Decimal,
        start_ms: i64,
    ) -> Result<Holdings> {
        if positions.is_empty() {
            return Err(Error::Validation("positions must not be empty".to_string()));
        }
        if total_capital <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "total capital must be positive, got {}",
                total_capital
            )));
        }

        let mut holdings = Holdings::new();
        for position in positions {
            if position.weight <= Decimal::ZERO || position.weight > Decimal::ONE {
                return Err(Error::Validation(format!(
                    "weight for {} must be in (0, 1], got {}",
                    position.symbol, position.weight
                )));
            }

            let price = self.entry_price(&position.symbol, start_ms).await?;
            let investment = total_capital * position.weight;
            let quantity = (investment / price)
                .round_dp_with_strategy(HOLDINGS_SCALE, RoundingStrategy::MidpointAwayFromZero);

            debug!(
                "holding {} {} (invested {} at entry price {})",
                quantity, position.symbol, investment, price
            );
            holdings.insert(position.symbol.clone(), quantity);
        }
        Ok(holdings)
    }

    /// Entry price for `symbol` near `start_ms`: the close of the earliest
    /// candle within ±1 minute, widening to ±5 minutes before giving up.
    async fn entry_price(&self, symbol: &str, start_ms: i64) -> Result<Decimal> {
        for tolerance in [ENTRY_PRICE_TOLERANCE_MS, ENTRY_PRICE_WIDE_TOLERANCE_MS] {
            let candles = self
                .store
                .query(symbol, start_ms - tolerance, start_ms + tolerance, Some(1))
                .await?;
            if let Some(first) = candles.first() {
                return Ok(first.close);
            }
        }
        Err(Error::NoPriceData(format!(
            "no candle for {} within {}ms of {}",
            symbol, ENTRY_PRICE_WIDE_TOLERANCE_MS, start_ms
        )))
    }

    /// Fetch every constituent's base-resolution series covering `range`.
    /// A portfolio cannot be valued with a missing constituent, so an empty
    /// series is an error.
    async fn fetch_asset_series(
        &self,
        holdings: &Holdings,
        range: TimeRange,
    ) -> Result<HashMap<String, Vec<Candle>>> {
        let mut series = HashMap::with_capacity(holdings.len());
        for symbol in holdings.keys() {
            let candles = self
                .store
                .query(symbol, range.start, range.end, None)
                .await?;
            if candles.is_empty() {
                return Err(Error::NoPriceData(format!(
                    "no candles for {} in [{}, {}]",
                    symbol, range.start, range.end
                )));
            }
            series.insert(symbol.clone(), candles);
        }
        Ok(series)
    }
}

/// Merge per-asset series into one synthetic portfolio series at base
/// resolution.
///
/// For every open time present in any series (restricted to
/// `[range.start, range.end]`, both ends inclusive), each asset holding a
/// candle at that exact timestamp contributes its OHLC scaled by the held
/// quantity; volumes and trade counts are summed unscaled. Assets missing a
/// timestamp are omitted from that bucket, not zero-filled, and a timestamp
/// no asset traded at produces no candle.
fn synthesize(
    holdings: &Holdings,
    series: &HashMap<String, Vec<Candle>>,
    range: TimeRange,
    base_interval: Interval,
) -> Vec<Candle> {
    let indexed: HashMap<&str, HashMap<i64, &Candle>> = series
        .iter()
        .map(|(symbol, candles)| {
            (
                symbol.as_str(),
                candles.iter().map(|c| (c.open_time, c)).collect(),
            )
        })
        .collect();

    let time_points: BTreeSet<i64> = series
        .values()
        .flatten()
        .map(|c| c.open_time)
        .filter(|&t| t >= range.start && t <= range.end)
        .collect();

    let mut portfolio = Vec::with_capacity(time_points.len());
    for t in time_points {
        let mut open = Decimal::ZERO;
        let mut high = Decimal::ZERO;
        let mut low = Decimal::ZERO;
        let mut close = Decimal::ZERO;
        let mut volume = Decimal::ZERO;
        let mut trade_count = 0;
        let mut has_data = false;

        for (symbol, quantity) in holdings {
            let Some(candle) = indexed.get(symbol.as_str()).and_then(|m| m.get(&t)) else {
                continue;
            };
            open += *quantity * candle.open;
            high += *quantity * candle.high;
            low += *quantity * candle.low;
            close += *quantity * candle.close;
            volume += candle.volume;
            trade_count += candle.trade_count;
            has_data = true;
        }

        if has_data {
            portfolio.push(Candle {
                symbol: PORTFOLIO_SYMBOL.to_string(),
                open_time: t,
                close_time: t + base_interval.millis() - 1,
                open,
                high,
                low,
                close,
                volume,
                trade_count,
            });
        }
    }
    portfolio
}
