//! Custom serde helpers for backend wire formats.

/// Deserializes a `Decimal` sent either as a JSON string or a JSON number.
///
/// The backend quantizes prices server-side and serializes them as strings,
/// but proxies in front of it sometimes re-encode them as numbers.
pub mod decimal_lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Raw::deserialize(deserializer)? {
            Raw::Str(s) => s,
            Raw::Num(n) => n.to_string(),
        };
        parse(&text).ok_or_else(|| serde::de::Error::custom(format!("Invalid decimal: {}", text)))
    }

    /// Parses plain or scientific notation (`"1.5"`, `"1e-7"`).
    pub fn parse(text: &str) -> Option<Decimal> {
        let text = text.trim();
        Decimal::from_str(text)
            .ok()
            .or_else(|| Decimal::from_scientific(text).ok())
    }
}

/// Unix-millis timestamp: accepts an integer or a float, writes an integer.
pub mod timestamp_ms {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = serde_json::Number::deserialize(deserializer)?;
        n.as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", n)))
    }
}
