//! Backend Contract
//!
//! The operation surface shared by every cache backend. File stores
//! implement it here; a networked backend satisfies the same contract
//! against a remote server.

use std::time::Duration;

use crate::cache::{InvalidateOptions, Options};
use crate::error::Result;
use crate::models::{CacheKey, CacheValue};

/// Backend identifier of the plain JSON file store.
pub const JSON_FILE_CACHE_TYPE: &str = "jsonfilecache";

/// Backend identifier of the encrypted JSON file store.
pub const ENCRYPTED_JSON_FILE_CACHE_TYPE: &str = "encryptedjsonfilecache";

pub trait CacheBackend {
    /// Returns the value stored under `key`.
    ///
    /// Absent and expired keys both fail with `CacheError::KeyNotFound`.
    fn get(&self, key: &CacheKey) -> Result<CacheValue>;

    /// Returns the value and its remaining lifetime (`None` if it never
    /// expires).
    fn get_with_ttl(&self, key: &CacheKey) -> Result<(CacheValue, Option<Duration>)>;

    /// Stores `value`. `None` applies the backend's default options.
    fn set(&self, key: &CacheKey, value: CacheValue, options: Option<Options>) -> Result<()>;

    /// Removes `key`; removing an absent key succeeds.
    fn delete(&self, key: &CacheKey) -> Result<()>;

    /// Removes every key associated with the given tags. `None` applies the
    /// backend's default tags.
    fn invalidate(&self, options: Option<InvalidateOptions>) -> Result<()>;

    /// Drops all cached state.
    fn clear(&self) -> Result<()>;

    /// Static identifier of the backend variant.
    fn backend_type(&self) -> &'static str;
}
