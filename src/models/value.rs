//! Cache value shapes accepted at the store boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// == Payload ==
/// Opaque bytes plus an optional declared encoding, stored as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Raw payload bytes, persisted as base64
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Encoding label declared by the caller (e.g. "utf-8", "json")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl Payload {
    /// Creates a payload without a declared encoding.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            encoding: None,
        }
    }

    /// Attaches an encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

// == Cache Value ==
/// A value handed to or returned from a backend.
///
/// File backends persist only `Payload`; the scalar variants exist for
/// backends with native string and integer types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    Payload(Payload),
    Text(String),
    Integer(i64),
}

impl CacheValue {
    /// Returns the raw bytes when the value is a payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CacheValue::Payload(payload) => Some(&payload.data),
            _ => None,
        }
    }

    /// Consumes the value, returning the payload if it is one.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            CacheValue::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    /// Short name of the value shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CacheValue::Payload(_) => "payload",
            CacheValue::Text(_) => "text",
            CacheValue::Integer(_) => "integer",
        }
    }
}

impl From<Payload> for CacheValue {
    fn from(payload: Payload) -> Self {
        CacheValue::Payload(payload)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(data: Vec<u8>) -> Self {
        CacheValue::Payload(Payload::new(data))
    }
}

impl From<&[u8]> for CacheValue {
    fn from(data: &[u8]) -> Self {
        CacheValue::Payload(Payload::new(data))
    }
}

impl<const N: usize> From<&[u8; N]> for CacheValue {
    fn from(data: &[u8; N]) -> Self {
        CacheValue::Payload(Payload::new(data.as_slice()))
    }
}

impl From<String> for CacheValue {
    fn from(text: String) -> Self {
        CacheValue::Text(text)
    }
}

impl From<&str> for CacheValue {
    fn from(text: &str) -> Self {
        CacheValue::Text(text.to_string())
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Integer(value)
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
