//! Portfolio input and holdings types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One weighted portfolio constituent.
///
/// The weight must lie in `(0, 1]`. Whether all weights sum to 1 is the
/// caller's contract; the engine deliberately does not normalize or check
/// the sum, because silently rescaling would hide the caller's intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Asset symbol, e.g. `"BTCUSDT"`.
    pub symbol: String,

    /// Capital share allocated to the asset, in `(0, 1]`.
    pub weight: Decimal,
}

impl Position {
    pub fn new(symbol: impl Into<String>, weight: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

/// Quantity of each asset implied by a capital allocation and entry price.
///
/// Derived once at portfolio-construction time and immutable for the run.
/// Ordered map so per-asset iteration is deterministic.
pub type Holdings = BTreeMap<String, Decimal>;
