//! Flags the simulator reads as `0`/`1` integers rather than JSON booleans.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagInput {
        Bool(bool),
        Number(u64),
    }

    match FlagInput::deserialize(deserializer)? {
        FlagInput::Bool(value) => Ok(value),
        FlagInput::Number(0) => Ok(false),
        FlagInput::Number(1) => Ok(true),
        FlagInput::Number(other) => Err(D::Error::custom(format!(
            "expected 0 or 1 for flag, got {other}"
        ))),
    }
}
