//! Candle interval definitions.
//!
//! Intervals are the fixed bucket durations a candle series can be keyed by.
//! Each variant carries the exchange wire code (Binance kline notation) and
//! its length in milliseconds. The one-month interval is a fixed 30 days,
//! matching the upstream kline APIs rather than calendar months.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an interval code string does not match any known interval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interval code: {0}")]
pub struct ParseIntervalError(pub String);

/// A fixed candle bucket duration.
///
/// A target interval is aggregable from a base interval only when
/// `target.millis() % base.millis() == 0`; the quotient is the window size
/// in base candles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Interval {
    /// Every interval, finest first.
    pub const ALL: [Interval; 16] = [
        Interval::OneSecond,
        Interval::OneMinute,
        Interval::ThreeMinutes,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::TwoHours,
        Interval::FourHours,
        Interval::SixHours,
        Interval::EightHours,
        Interval::TwelveHours,
        Interval::OneDay,
        Interval::ThreeDays,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    /// Length of this interval in milliseconds.
    pub fn millis(&self) -> i64 {
        match self {
            Interval::OneSecond => 1_000,
            Interval::OneMinute => 60_000,
            Interval::ThreeMinutes => 3 * 60_000,
            Interval::FiveMinutes => 5 * 60_000,
            Interval::FifteenMinutes => 15 * 60_000,
            Interval::ThirtyMinutes => 30 * 60_000,
            Interval::OneHour => 3_600_000,
            Interval::TwoHours => 2 * 3_600_000,
            Interval::FourHours => 4 * 3_600_000,
            Interval::SixHours => 6 * 3_600_000,
            Interval::EightHours => 8 * 3_600_000,
            Interval::TwelveHours => 12 * 3_600_000,
            Interval::OneDay => 86_400_000,
            Interval::ThreeDays => 3 * 86_400_000,
            Interval::OneWeek => 7 * 86_400_000,
            Interval::OneMonth => 30 * 86_400_000,
        }
    }

    /// Exchange wire code, e.g. `"1m"` or `"1M"`.
    pub fn code(&self) -> &'static str {
        match self {
            Interval::OneSecond => "1s",
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::EightHours => "8h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
            Interval::ThreeDays => "3d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1M",
        }
    }

    /// Whether a series at `base` resolution can be aggregated into this
    /// interval (equal intervals count as aggregable).
    pub fn is_aggregable_from(&self, base: Interval) -> bool {
        self.millis() % base.millis() == 0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .iter()
            .find(|interval| interval.code() == s)
            .copied()
            .ok_or_else(|| ParseIntervalError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_values() {
        assert_eq!(Interval::OneSecond.millis(), 1_000);
        assert_eq!(Interval::OneMinute.millis(), 60_000);
        assert_eq!(Interval::FiveMinutes.millis(), 300_000);
        assert_eq!(Interval::OneHour.millis(), 3_600_000);
        assert_eq!(Interval::OneDay.millis(), 86_400_000);
        assert_eq!(Interval::OneWeek.millis(), 604_800_000);
        assert_eq!(Interval::OneMonth.millis(), 2_592_000_000);
    }

    #[test]
    fn test_code_round_trips_through_from_str() {
        for interval in Interval::ALL {
            assert_eq!(interval.code().parse::<Interval>(), Ok(interval));
        }
    }

    #[test]
    fn test_month_code_is_case_sensitive() {
        // "1m" is one minute, "1M" is one month.
        assert_eq!("1m".parse::<Interval>(), Ok(Interval::OneMinute));
        assert_eq!("1M".parse::<Interval>(), Ok(Interval::OneMonth));
    }

    #[test]
    fn test_unknown_code_fails_to_parse() {
        let err = "7m".parse::<Interval>().unwrap_err();
        assert_eq!(err, ParseIntervalError("7m".to_string()));
    }

    #[test]
    fn test_aggregable_when_evenly_divisible() {
        assert!(Interval::FiveMinutes.is_aggregable_from(Interval::OneMinute));
        assert!(Interval::OneHour.is_aggregable_from(Interval::FifteenMinutes));
        assert!(Interval::OneDay.is_aggregable_from(Interval::OneDay));
    }

    #[test]
    fn test_not_aggregable_when_remainder() {
        // Smaller than base, and not a multiple of it.
        assert!(!Interval::ThreeMinutes.is_aggregable_from(Interval::FiveMinutes));
        // Larger than base but not a multiple.
        assert!(!Interval::OneHour.is_aggregable_from(Interval::EightHours));
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&Interval::OneMonth).unwrap();
        assert_eq!(json, "\"1M\"");
        let parsed: Interval = serde_json::from_str("\"15m\"").unwrap();
        assert_eq!(parsed, Interval::FifteenMinutes);
    }
}
