//! Configuration Module
//!
//! Handles loading store configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{JsonFileStore, Options, ZeroTtlPolicy};
use crate::error::{CacheError, Result};

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct StoreConfig {
    /// Backing cache file
    pub path: PathBuf,
    /// Default TTL in seconds applied when `set` gets no options
    pub default_ttl: u64,
    /// Default tags applied when `set` or `invalidate` get no options
    pub default_tags: Vec<String>,
    /// Hex-encoded encryption key; selects the encrypted store when present
    pub encryption_key: Option<String>,
    /// Interpretation of a zero TTL
    pub zero_ttl: ZeroTtlPolicy,
    /// Delete expired entries when a read observes them
    pub collect_on_read: bool,
}

impl StoreConfig {
    /// Creates a new StoreConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_FILE` - Cache file path (default: cache.json)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 0)
    /// - `CACHE_DEFAULT_TAGS` - Comma-separated default tags (default: none)
    /// - `CACHE_ENCRYPTION_KEY` - Hex AES key of 16, 24 or 32 bytes (default: unset)
    /// - `CACHE_ZERO_TTL` - `never`, `now` or `immediate` (default: never)
    /// - `CACHE_COLLECT_ON_READ` - Collect expired entries on read (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            path: env::var("CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            default_tags: env::var("CACHE_DEFAULT_TAGS")
                .map(|v| parse_tags(&v))
                .unwrap_or(defaults.default_tags),
            encryption_key: env::var("CACHE_ENCRYPTION_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            zero_ttl: env::var("CACHE_ZERO_TTL")
                .ok()
                .and_then(|v| ZeroTtlPolicy::parse(&v))
                .unwrap_or(defaults.zero_ttl),
            collect_on_read: env::var("CACHE_COLLECT_ON_READ")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.collect_on_read),
        }
    }

    /// Store-level options built from the defaults.
    pub fn default_options(&self) -> Options {
        Options::new()
            .with_expiration(Duration::from_secs(self.default_ttl))
            .with_tags(self.default_tags.iter().cloned())
    }

    /// Whether this configuration opens the encrypted store.
    pub fn is_encrypted(&self) -> bool {
        self.encryption_key.is_some()
    }

    /// Validates the path and opens the store this configuration describes.
    pub fn open(&self) -> Result<JsonFileStore> {
        let store = match &self.encryption_key {
            Some(encoded) => {
                let key = hex::decode(encoded.trim()).map_err(|err| {
                    CacheError::InvalidEncryptionKey(format!("key is not hex: {err}"))
                })?;
                JsonFileStore::encrypted(&self.path, key, self.default_options())?
            }
            None => JsonFileStore::new(&self.path, self.default_options())?,
        };
        Ok(store
            .with_zero_ttl_policy(self.zero_ttl)
            .with_collect_on_read(self.collect_on_read))
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("path", &self.path)
            .field("default_ttl", &self.default_ttl)
            .field("default_tags", &self.default_tags)
            .field("encrypted", &self.is_encrypted())
            .field("zero_ttl", &self.zero_ttl)
            .field("collect_on_read", &self.collect_on_read)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cache.json"),
            default_ttl: 0,
            default_tags: Vec::new(),
            encryption_key: None,
            zero_ttl: ZeroTtlPolicy::NeverExpire,
            collect_on_read: true,
        }
    }
}

fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
