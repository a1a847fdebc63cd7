//! Note id serialization helpers.
//!
//! The host uses integer note ids, while this crate passes them around as
//! strings. Deserialization accepts either form; serialization emits an integer
//! whenever the id is numeric.

use serde::{Deserialize, Deserializer, Serializer};

/// Serializes a numeric id as an integer, anything else as a string.
pub fn serialize<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id.parse::<i64>() {
        Ok(n) => serializer.serialize_i64(n),
        Err(_) => serializer.serialize_str(id),
    }
}

/// Deserializes an id from a string or an integer.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrString {
        String(String),
        I64(i64),
        U64(u64),
    }

    Ok(match IdOrString::deserialize(deserializer)? {
        IdOrString::String(s) => s,
        IdOrString::I64(n) => n.to_string(),
        IdOrString::U64(n) => n.to_string(),
    })
}
