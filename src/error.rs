//! Error types for the file cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for every store, codec and persistence operation.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key shape not accepted by this backend
    #[error("key type ({0}) is not supported")]
    UnsupportedKeyType(String),

    /// Value shape not accepted by this backend
    #[error("value type ({0}) is not supported")]
    UnsupportedValueType(String),

    /// Key absent or logically expired
    #[error("key {0} is undefined")]
    KeyNotFound(String),

    /// Backing content is not a valid cache document
    #[error("malformed cache document: {0}")]
    Format(String),

    /// Backing path cannot be used as a cache file
    #[error("invalid cache path: {0}")]
    Path(String),

    /// Backing path is not readable and writable
    #[error("permission denied: {0}")]
    Permission(String),

    /// Encryption key has a length the cipher does not accept
    #[error("invalid encryption key: {0}")]
    InvalidEncryptionKey(String),

    /// Sealed data failed integrity verification
    #[error("authentication failed: ciphertext was tampered with or the key is wrong")]
    Authentication,

    /// Cipher failure while sealing
    #[error("encryption failed")]
    Encryption,

    /// Underlying file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Format(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the file cache.
pub type Result<T> = std::result::Result<T, CacheError>;
