//! Half-open time ranges and range partitioning.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A half-open `[start, end)` window in milliseconds since epoch.
///
/// `start < end` holds for every constructed value. Ranges are immutable,
/// short-lived computation parameters; partitioning is pure and safe to call
/// from any number of threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Window start, inclusive.
    pub start: i64,
    /// Window end, exclusive.
    pub end: i64,
}

impl TimeRange {
    /// Build a range, rejecting `start >= end`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Window length in milliseconds.
    pub fn span_ms(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `ts` falls inside the half-open window.
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts < self.end
    }

    /// Split this range into consecutive sub-ranges of at most `max_span_ms`
    /// milliseconds each.
    ///
    /// The sub-ranges cover `[start, end)` exactly once, in order, with no
    /// gaps or overlaps; only the last one may be shorter than the span.
    /// Fails with [`Error::InvalidRange`] when `max_span_ms <= 0`.
    pub fn partition(&self, max_span_ms: i64) -> Result<Vec<TimeRange>> {
        if max_span_ms <= 0 {
            return Err(Error::InvalidRange(format!(
                "partition span must be positive, got {}",
                max_span_ms
            )));
        }

        let mut ranges = Vec::new();
        let mut current = self.start;
        while current < self.end {
            let end = (current + max_span_ms).min(self.end);
            ranges.push(TimeRange {
                start: current,
                end,
            });
            current = end;
        }
        Ok(ranges)
    }
}
