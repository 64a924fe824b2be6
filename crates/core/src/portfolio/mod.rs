//! Weighted multi-asset portfolio valuation.
//!
//! - `model` - [`Position`] inputs and derived [`Holdings`]
//! - `valuation` - the simulation service producing synthetic candles

mod model;
mod valuation;

pub use model::{Holdings, Position};
pub use valuation::PortfolioValuationService;
