//! Token domain: the Alpha token listing used to populate the selector.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::select::Candidate;
use crate::shared::AlphaId;
use serde::{Deserialize, Serialize};

/// A selectable Alpha token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    #[serde(rename = "alphaId")]
    pub alpha_id: AlphaId,
}

impl Token {
    pub fn new(symbol: impl Into<String>, alpha_id: impl Into<AlphaId>) -> Self {
        Self {
            symbol: symbol.into(),
            alpha_id: alpha_id.into(),
        }
    }

    /// Selector label, e.g. `"KOGE (ALPHA_22)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.symbol, self.alpha_id)
    }

    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.alpha_id.as_str(), self.label())
    }
}

/// Build selector candidates from a token listing, preserving order.
pub fn candidates(tokens: &[Token]) -> Vec<Candidate> {
    tokens.iter().map(Token::candidate).collect()
}
