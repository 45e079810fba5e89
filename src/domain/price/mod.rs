//! Price domain: price snapshots and the bounded history they feed.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::PriceValidationError;
pub use state::{HistoryBuffer, PriceRow, Trend, DEFAULT_HISTORY_CAPACITY};

/// One price snapshot: last trade, simple average and VWAP over the recent
/// aggregated trades, stamped by the backend.
///
/// Immutable once created; only a successful price lookup produces one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub symbol: String,
    pub price_now: Decimal,
    pub price_avg: Decimal,
    pub price_vwap: Decimal,
    /// Unix timestamp in milliseconds.
    pub timestamp_millis: i64,
}

impl Observation {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_millis)
    }
}
