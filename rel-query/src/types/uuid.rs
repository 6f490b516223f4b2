use std::fmt;

use candid::CandidType;
use serde::{Deserialize, Serialize};

const UUID_SIZE: usize = 16;

/// UUID value carried by filters and fragments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid(pub uuid::Uuid);

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(value: uuid::Uuid) -> Self {
        Uuid(value)
    }
}

impl From<Uuid> for uuid::Uuid {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

impl CandidType for Uuid {
    fn _ty() -> candid::types::Type {
        candid::types::Type(std::rc::Rc::new(candid::types::TypeInner::Vec(
            candid::types::Type(std::rc::Rc::new(candid::types::TypeInner::Nat8)),
        )))
    }

    fn idl_serialize<S>(&self, serializer: S) -> Result<(), S::Error>
    where
        S: candid::types::Serializer,
    {
        serializer.serialize_blob(self.0.as_bytes())
    }
}

impl Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(self.0.as_bytes())
    }
}

impl<'de> Deserialize<'de> for Uuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        let bytes: [u8; UUID_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid UUID length"))?;
        Ok(Uuid(uuid::Uuid::from_bytes(bytes)))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_display_uuid() {
        let uuid = Uuid(uuid::Uuid::from_u128(0x67e55044_10b1_426f_9247_bb680e5fe0c8));
        assert_eq!(uuid.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_should_candid_encode_decode() {
        let src = Uuid(uuid::Uuid::from_u128(42));
        let buf = candid::encode_one(src).expect("Candid encoding failed");
        let decoded: Uuid = candid::decode_one(&buf).expect("Candid decoding failed");
        assert_eq!(src, decoded);
    }

    #[test]
    fn test_should_reject_invalid_uuid_length() {
        let buf = candid::encode_one(vec![1u8, 2, 3]).expect("Candid encoding failed");
        let decoded: Result<Uuid, _> = candid::decode_one(&buf);
        assert!(decoded.is_err());
    }
}
