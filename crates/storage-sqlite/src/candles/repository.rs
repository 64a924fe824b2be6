use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use coinfolio_core::candles::{Candle, CandleStore};
use coinfolio_core::Result;

use super::model::CandleDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::candles::dsl as candles_dsl;

/// SQLite-backed candle store.
///
/// Reads go straight to the pool; writes are serialized through the single
/// writer actor.
pub struct CandleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CandleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CandleStore for CandleRepository {
    /// Upserts the batch keyed on `(symbol, open_time)`. Re-ingesting an
    /// already stored range overwrites rows in place, so ingestion retries
    /// never produce duplicates.
    async fn insert_batch(&self, candles: &[Candle]) -> Result<usize> {
        if candles.is_empty() {
            return Ok(0);
        }

        let db_rows: Vec<CandleDB> = candles.iter().map(CandleDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut total_upserted = 0;
                // SQLite caps bound parameters per statement; chunk well below it.
                for chunk in db_rows.chunks(1_000) {
                    total_upserted += diesel::replace_into(candles_dsl::candles)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::QueryFailed)?;
                }
                Ok(total_upserted)
            })
            .await
    }

    /// Returns candles for `symbol` with `start_ms <= open_time <= end_ms`,
    /// ascending by open time. Both bounds are inclusive.
    async fn query(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Candle>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = candles_dsl::candles
            .filter(candles_dsl::symbol.eq(symbol))
            .filter(candles_dsl::open_time.ge(start_ms))
            .filter(candles_dsl::open_time.le(end_ms))
            .order(candles_dsl::open_time.asc())
            .into_boxed();

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let results = query.load::<CandleDB>(&mut conn).into_core()?;

        Ok(results.into_iter().map(Candle::from).collect())
    }
}
