//! Conversion: TokenListResponse → Vec<Token>.

use super::wire::{TokenItemResponse, TokenListResponse};
use super::Token;

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TokenItemResponse {
    /// `symbol | baseSymbol | name` and `alphaId | id | symbol`; `None` if either is missing.
    pub fn into_token(self) -> Option<Token> {
        let id = self.id.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let symbol = non_empty(self.symbol)
            .or_else(|| non_empty(self.base_symbol))
            .or_else(|| non_empty(self.name))?;
        let alpha_id = non_empty(self.alpha_id)
            .or_else(|| non_empty(id))
            .unwrap_or_else(|| symbol.clone());
        Some(Token::new(symbol, alpha_id))
    }
}

impl From<TokenListResponse> for Vec<Token> {
    fn from(resp: TokenListResponse) -> Self {
        match resp {
            TokenListResponse::List(items) => items
                .into_iter()
                .filter_map(TokenItemResponse::into_token)
                .collect(),
            TokenListResponse::Wrapped { data } => (*data).into(),
            TokenListResponse::Map(map) => map
                .into_iter()
                .map(|(alpha_id, symbol)| Token::new(symbol, alpha_id))
                .collect(),
        }
    }
}
