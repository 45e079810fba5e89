//! Range calculation domain: price-diff bounds for a per-trade volume.
//!
//! The computation itself runs on the backend; this module validates the
//! inputs the same way the backend does and carries the result.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::error::SdkError;
use crate::shared::serde_util::decimal_lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::Calculator;

/// Editable calculator fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    PerVolume,
    WasteLower,
    WasteUpper,
    FeeAmountToken,
}

impl RangeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeField::PerVolume => "per_volume",
            RangeField::WasteLower => "waste_lower",
            RangeField::WasteUpper => "waste_upper",
            RangeField::FeeAmountToken => "fee_amount_token",
        }
    }
}

/// Raw user input, kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInputs {
    /// Per-trade volume in USDT.
    pub per_volume: String,
    /// Lower waste bound in USDT.
    pub waste_lower: String,
    /// Upper waste bound in USDT.
    pub waste_upper: String,
    /// Fee charged in tokens.
    pub fee_amount_token: String,
}

impl Default for RangeInputs {
    fn default() -> Self {
        Self {
            per_volume: "1030".to_string(),
            waste_lower: "0.15".to_string(),
            waste_upper: "0.25".to_string(),
            fee_amount_token: "0".to_string(),
        }
    }
}

impl RangeInputs {
    pub fn get(&self, field: RangeField) -> &str {
        match field {
            RangeField::PerVolume => &self.per_volume,
            RangeField::WasteLower => &self.waste_lower,
            RangeField::WasteUpper => &self.waste_upper,
            RangeField::FeeAmountToken => &self.fee_amount_token,
        }
    }

    pub fn set(&mut self, field: RangeField, value: impl Into<String>) {
        let slot = match field {
            RangeField::PerVolume => &mut self.per_volume,
            RangeField::WasteLower => &mut self.waste_lower,
            RangeField::WasteUpper => &mut self.waste_upper,
            RangeField::FeeAmountToken => &mut self.fee_amount_token,
        };
        *slot = value.into();
    }

    fn parse(&self, field: RangeField) -> Result<Decimal, SdkError> {
        let raw = self.get(field);
        decimal_lenient::parse(raw)
            .ok_or_else(|| SdkError::Validation(format!("{} is not a number: {:?}", field.as_str(), raw)))
    }
}

/// Validated body for `POST /api/calc/price-range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRequest {
    pub price_now: Decimal,
    pub per_volume: Decimal,
    pub waste_lower: Decimal,
    pub waste_upper: Decimal,
    pub fee_amount_token: Decimal,
}

impl RangeRequest {
    /// `price_now` and `per_volume` must be positive; wastes and fee non-negative.
    pub fn new(price_now: Decimal, inputs: &RangeInputs) -> Result<Self, SdkError> {
        let request = Self {
            price_now,
            per_volume: inputs.parse(RangeField::PerVolume)?,
            waste_lower: inputs.parse(RangeField::WasteLower)?,
            waste_upper: inputs.parse(RangeField::WasteUpper)?,
            fee_amount_token: inputs.parse(RangeField::FeeAmountToken)?,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        let positive = [("price_now", self.price_now), ("per_volume", self.per_volume)];
        for (name, value) in positive {
            if value <= Decimal::ZERO {
                return Err(SdkError::Validation(format!("{} must be > 0", name)));
            }
        }
        let non_negative = [
            ("waste_lower", self.waste_lower),
            ("waste_upper", self.waste_upper),
            ("fee_amount_token", self.fee_amount_token),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(SdkError::Validation(format!("{} must be >= 0", name)));
            }
        }
        Ok(())
    }
}

/// Absolute price-diff bounds in quote currency per token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeResult {
    #[serde(deserialize_with = "decimal_lenient::deserialize")]
    pub diff_lower: Decimal,
    #[serde(deserialize_with = "decimal_lenient::deserialize")]
    pub diff_upper: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_request_from_default_inputs() {
        let req = RangeRequest::new(dec("2.5"), &RangeInputs::default()).unwrap();
        assert_eq!(req.per_volume, dec("1030"));
        assert_eq!(req.waste_lower, dec("0.15"));
        assert_eq!(req.waste_upper, dec("0.25"));
        assert_eq!(req.fee_amount_token, Decimal::ZERO);
    }

    #[test]
    fn test_request_serializes_decimals_as_strings() {
        let req = RangeRequest::new(dec("2.5"), &RangeInputs::default()).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["price_now"], "2.5");
        assert_eq!(json["per_volume"], "1030");
    }

    #[test]
    fn test_request_rejects_non_positive_price() {
        let err = RangeRequest::new(Decimal::ZERO, &RangeInputs::default()).unwrap_err();
        assert_eq!(err.user_message(), "price_now must be > 0");
    }

    #[test]
    fn test_request_rejects_bad_inputs() {
        let mut inputs = RangeInputs::default();
        inputs.set(RangeField::WasteUpper, "-1");
        let err = RangeRequest::new(dec("1"), &inputs).unwrap_err();
        assert_eq!(err.user_message(), "waste_upper must be >= 0");

        inputs.set(RangeField::PerVolume, "lots");
        assert!(RangeRequest::new(dec("1"), &inputs).is_err());
    }

    #[test]
    fn test_result_accepts_strings_and_numbers() {
        let r: RangeResult =
            serde_json::from_str(r#"{"diff_lower":"0.00014563","diff_upper":0.00024272}"#).unwrap();
        assert_eq!(r.diff_lower, dec("0.00014563"));
        assert_eq!(r.diff_upper, dec("0.00024272"));
    }
}
