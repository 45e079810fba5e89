//! Wire types for the token listing (REST).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw listing entry. Field names vary with the upstream source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenItemResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, rename = "baseSymbol", skip_serializing_if = "Option::is_none")]
    pub base_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "alphaId", skip_serializing_if = "Option::is_none")]
    pub alpha_id: Option<String>,
    /// Numeric or string id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// REST response for `GET /api/alpha/tokens`.
///
/// Accepts a plain list, a `{ "data": ... }` wrapper, or an `{ alphaId: symbol }` map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenListResponse {
    List(Vec<TokenItemResponse>),
    Wrapped { data: Box<TokenListResponse> },
    Map(BTreeMap<String, String>),
}

impl Default for TokenListResponse {
    fn default() -> Self {
        TokenListResponse::List(Vec::new())
    }
}
