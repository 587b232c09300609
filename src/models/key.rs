//! Cache key shapes accepted at the store boundary.

/// A cache key as handed to a backend.
///
/// File backends only understand `Text` keys; `Binary` keys exist for
/// backends that address entries by raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Text(String),
    Binary(Vec<u8>),
}

impl CacheKey {
    /// Returns the key as a string slice when it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CacheKey::Text(key) => Some(key),
            CacheKey::Binary(_) => None,
        }
    }

    /// Short name of the key shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CacheKey::Text(_) => "text",
            CacheKey::Binary(_) => "binary",
        }
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        CacheKey::Text(key.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        CacheKey::Text(key)
    }
}

impl From<&String> for CacheKey {
    fn from(key: &String) -> Self {
        CacheKey::Text(key.clone())
    }
}

impl From<Vec<u8>> for CacheKey {
    fn from(key: Vec<u8>) -> Self {
        CacheKey::Binary(key)
    }
}

impl From<&[u8]> for CacheKey {
    fn from(key: &[u8]) -> Self {
        CacheKey::Binary(key.to_vec())
    }
}
