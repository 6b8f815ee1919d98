//! Serde support: a `ScaledNumber` is stored as its full-precision text.
//!
//! Saves therefore read like `"1.2345K"` and load back bit-identical. A
//! malformed entry fails deserialization with the underlying [`ParseError`]
//! message; the save layer decides how to recover.
//!
//! [`ParseError`]: super::ParseError

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::scaled::ScaledNumber;

impl Serialize for ScaledNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_full())
    }
}

impl<'de> Deserialize<'de> for ScaledNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ScaledNumberVisitor)
    }
}

struct ScaledNumberVisitor;

impl Visitor<'_> for ScaledNumberVisitor {
    type Value = ScaledNumber;

    fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("a scaled number such as \"1.5K\"")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ScaledNumber::parse(value).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_full_precision_text() {
        let x = ScaledNumber::from_raw(1.0 / 3.0 * 1e9).unwrap();
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(json, format!("\"{}\"", x.format_full()));

        let back: ScaledNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn malformed_entries_fail_to_load() {
        let result: Result<ScaledNumber, _> = serde_json::from_str("\"1.5??\"");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unknown magnitude suffix"), "{message}");
    }
}
