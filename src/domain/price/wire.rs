//! Wire types for price lookups (REST).

use serde::{Deserialize, Serialize};

/// A price sent as a JSON string (quantized decimal) or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Str(String),
    Num(serde_json::Number),
}

impl PriceValue {
    pub fn as_text(&self) -> String {
        match self {
            PriceValue::Str(s) => s.clone(),
            PriceValue::Num(n) => n.to_string(),
        }
    }
}

/// REST response for `GET /api/alpha/price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    pub symbol: String,
    pub price_now: PriceValue,
    pub price_avg: PriceValue,
    pub price_vwap: PriceValue,
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub timestamp: i64,
}
