//! Database model for stored candles.

use std::str::FromStr;

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinfolio_core::candles::Candle;

/// Database model for candles.
///
/// Prices and volumes are stored as decimal strings. SQLite has no exact
/// numeric type, and round-tripping through floats would corrupt the
/// fixed-point values the valuation math depends on.
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Insertable,
    AsChangeset,
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
)]
#[diesel(table_name = crate::schema::candles)]
#[diesel(primary_key(symbol, open_time))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CandleDB {
    pub symbol: String,
    pub open_time: i64,
    pub close_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub trade_count: i64,
    pub created_at: String,
}

impl From<&Candle> for CandleDB {
    fn from(candle: &Candle) -> Self {
        Self {
            symbol: candle.symbol.clone(),
            open_time: candle.open_time,
            close_time: candle.close_time,
            open: candle.open.to_string(),
            high: candle.high.to_string(),
            low: candle.low.to_string(),
            close: candle.close.to_string(),
            volume: candle.volume.to_string(),
            trade_count: candle.trade_count,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

impl From<CandleDB> for Candle {
    fn from(db: CandleDB) -> Self {
        Self {
            symbol: db.symbol,
            open_time: db.open_time,
            close_time: db.close_time,
            open: parse_decimal(&db.open),
            high: parse_decimal(&db.high),
            low: parse_decimal(&db.low),
            close: parse_decimal(&db.close),
            volume: parse_decimal(&db.volume),
            trade_count: db.trade_count,
        }
    }
}

/// Stored values are written by `CandleDB::from`, so they are always valid
/// decimal strings; anything else means external tampering, which degrades
/// to zero rather than poisoning a whole query.
fn parse_decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|_| {
        log::warn!("unparseable decimal '{}' in candles table, using 0", s);
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_candle() -> Candle {
        Candle {
            symbol: "BTCUSDT".to_string(),
            open_time: 1_700_000_000_000,
            close_time: 1_700_000_059_999,
            open: dec!(42000.12345678),
            high: dec!(42100.5),
            low: dec!(41900),
            close: dec!(42050.00000001),
            volume: dec!(12.34567890),
            trade_count: 4321,
        }
    }

    #[test]
    fn test_round_trip_preserves_decimals() {
        let candle = sample_candle();
        let db = CandleDB::from(&candle);
        assert_eq!(db.open, "42000.12345678");

        let back = Candle::from(db);
        assert_eq!(back, candle);
    }

    #[test]
    fn test_unparseable_decimal_degrades_to_zero() {
        let mut db = CandleDB::from(&sample_candle());
        db.close = "not-a-number".to_string();
        let back = Candle::from(db);
        assert_eq!(back.close, Decimal::ZERO);
    }
}
