use std::rc::Rc;

use candid::CandidType;
use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};

/// Decimal value carried by filters and fragments.
///
/// Encoded as text on the wire, so no precision is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(pub RustDecimal);

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CandidType for Decimal {
    fn _ty() -> candid::types::Type {
        candid::types::Type(Rc::new(candid::types::TypeInner::Text))
    }

    fn idl_serialize<S>(&self, serializer: S) -> Result<(), S::Error>
    where
        S: candid::types::Serializer,
    {
        serializer.serialize_text(&self.0.to_string())
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = RustDecimal::from_str_exact(&s).map_err(serde::de::Error::custom)?;
        Ok(Decimal(decimal))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_display_decimal() {
        let decimal = Decimal(RustDecimal::new(12345, 2));
        assert_eq!(decimal.to_string(), "123.45");
    }

    #[test]
    fn test_should_candid_encode_decode() {
        let original_decimal = Decimal(RustDecimal::new(67890, 3)); // Represents 67.890
        let buf = candid::encode_one(original_decimal).expect("Candid encoding failed");
        let decoded: Decimal = candid::decode_one(&buf).expect("Candid decoding failed");
        assert_eq!(original_decimal, decoded);
    }
}
