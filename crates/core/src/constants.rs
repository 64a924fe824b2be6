//! Engine-wide constants.

/// Symbol marker carried by synthetic portfolio candles.
pub const PORTFOLIO_SYMBOL: &str = "PORTFOLIO";

/// Fractional digits kept when deriving holdings quantities. Together with
/// half-up rounding this is a hard compatibility requirement: it determines
/// portfolio value drift at the margins.
pub const HOLDINGS_SCALE: u32 = 8;

/// First tolerance window around the range start for entry-price lookups.
pub const ENTRY_PRICE_TOLERANCE_MS: i64 = 60_000;

/// Widened tolerance window used when the first lookup finds nothing.
pub const ENTRY_PRICE_WIDE_TOLERANCE_MS: i64 = 300_000;

/// Default bound on concurrent sub-range fetches during ingestion.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;
