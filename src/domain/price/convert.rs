//! Conversion: PriceResponse → Observation (TryFrom + validation).

use super::wire::{PriceResponse, PriceValue};
use super::Observation;
use crate::error::SdkError;
use crate::shared::serde_util::decimal_lenient;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceValidationError {
    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("missing symbol")]
    MissingSymbol,
}

impl From<PriceValidationError> for SdkError {
    fn from(e: PriceValidationError) -> Self {
        SdkError::Validation(e.to_string())
    }
}

fn number(field: &'static str, value: &PriceValue) -> Result<Decimal, PriceValidationError> {
    let text = value.as_text();
    decimal_lenient::parse(&text).ok_or(PriceValidationError::InvalidNumber { field, value: text })
}

impl TryFrom<PriceResponse> for Observation {
    type Error = PriceValidationError;

    fn try_from(source: PriceResponse) -> Result<Self, Self::Error> {
        let symbol = source.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(PriceValidationError::MissingSymbol);
        }
        Ok(Self {
            symbol,
            price_now: number("price_now", &source.price_now)?,
            price_avg: number("price_avg", &source.price_avg)?,
            price_vwap: number("price_vwap", &source.price_vwap)?,
            timestamp_millis: source.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_string_and_number_prices() {
        let resp: PriceResponse = serde_json::from_str(
            r#"{"symbol":"KOGEUSDT","price_now":"47.99000000","price_avg":47.98,"price_vwap":"47.985","timestamp":1700000000000}"#,
        )
        .unwrap();
        let obs = Observation::try_from(resp).unwrap();
        assert_eq!(obs.symbol, "KOGEUSDT");
        assert_eq!(obs.price_now, Decimal::from_str("47.99").unwrap());
        assert_eq!(obs.price_avg, Decimal::from_str("47.98").unwrap());
        assert_eq!(obs.price_vwap, Decimal::from_str("47.985").unwrap());
        assert_eq!(obs.timestamp_millis, 1_700_000_000_000);
        assert!(obs.timestamp().is_some());
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let resp: PriceResponse = serde_json::from_str(
            r#"{"symbol":"X","price_now":"n/a","price_avg":"1","price_vwap":"1","timestamp":0}"#,
        )
        .unwrap();
        let err = Observation::try_from(resp).unwrap_err();
        assert_eq!(err.to_string(), "invalid price_now: n/a");
    }

    #[test]
    fn test_missing_symbol_is_rejected() {
        let resp: PriceResponse = serde_json::from_str(
            r#"{"symbol":" ","price_now":"1","price_avg":"1","price_vwap":"1","timestamp":0}"#,
        )
        .unwrap();
        assert_eq!(
            Observation::try_from(resp).unwrap_err(),
            PriceValidationError::MissingSymbol
        );
    }
}
