//! Cache Store Module
//!
//! The public file-backed store. Every operation loads the whole document
//! through its `FileIo`, applies one mutation or lookup, and writes the
//! document back when it changed.
//!
//! # Concurrency
//! The store keeps no document state between calls and takes no locks.
//! Two callers (threads or processes) mutating the same file race on the
//! read-modify-write cycle, and the last writer's snapshot silently wins.
//! Callers that share a file must serialize access themselves.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::{CacheBackend, ENCRYPTED_JSON_FILE_CACHE_TYPE, JSON_FILE_CACHE_TYPE};
use crate::cache::expiry::{is_past, now_unix, remaining};
use crate::cache::{CacheDocument, CacheStats, InvalidateOptions, Options, ZeroTtlPolicy};
use crate::error::{CacheError, Result};
use crate::models::{CacheKey, CacheValue, Payload};
use crate::persistence::{validate_path, EncryptedFileIo, FileIo, PlainFileIo};

// == JSON File Store ==
/// File-backed cache with tag invalidation and lazy TTL expiration.
pub struct JsonFileStore {
    /// Byte port to the backing file
    io: Box<dyn FileIo>,
    /// Identifier returned by `backend_type`
    backend_type: &'static str,
    /// Options applied when a call passes none
    defaults: Options,
    /// Interpretation of a zero expiration
    zero_ttl: ZeroTtlPolicy,
    /// Delete expired entries when a read observes them
    collect_on_read: bool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl JsonFileStore {
    // == Constructors ==
    /// Opens a plain JSON file store at `path`.
    ///
    /// The path is validated once; a missing file is created empty.
    pub fn new(path: impl Into<PathBuf>, defaults: Options) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self::from_io(
            Box::new(PlainFileIo::new(path)),
            JSON_FILE_CACHE_TYPE,
            defaults,
        ))
    }

    /// Opens a store whose file is encrypted with `key` (16, 24 or 32 bytes).
    pub fn encrypted(
        path: impl Into<PathBuf>,
        key: impl Into<Vec<u8>>,
        defaults: Options,
    ) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self::from_io(
            Box::new(EncryptedFileIo::new(path, key)?),
            ENCRYPTED_JSON_FILE_CACHE_TYPE,
            defaults,
        ))
    }

    /// Builds a store over an arbitrary byte port. No path validation is
    /// performed.
    pub fn from_io(io: Box<dyn FileIo>, backend_type: &'static str, defaults: Options) -> Self {
        Self {
            io,
            backend_type,
            defaults,
            zero_ttl: ZeroTtlPolicy::default(),
            collect_on_read: true,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Sets how a zero expiration on `set` is interpreted.
    pub fn with_zero_ttl_policy(mut self, policy: ZeroTtlPolicy) -> Self {
        self.zero_ttl = policy;
        self
    }

    /// Enables or disables deleting expired entries during reads.
    pub fn with_collect_on_read(mut self, enabled: bool) -> Self {
        self.collect_on_read = enabled;
        self
    }

    // == Accessors ==
    /// Path of the backing cache file.
    pub fn path(&self) -> &Path {
        self.io.path()
    }

    /// Options applied when a call passes none.
    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// Interpretation of a zero expiration on `set`.
    pub fn zero_ttl_policy(&self) -> ZeroTtlPolicy {
        self.zero_ttl
    }

    // == Maintenance ==
    /// Removes every expired entry in one document round-trip.
    ///
    /// Returns the number of entries removed. The file is left untouched
    /// when nothing expired.
    pub fn purge_expired(&self) -> Result<usize> {
        let mut doc = self.read_document()?;
        let removed = doc.purge_expired(now_unix());
        if removed > 0 {
            self.write_document(&doc)?;
            info!(path = %self.path().display(), removed, "purged expired entries");
        }
        Ok(removed)
    }

    /// Returns occupancy of the backing file and this store's read counters.
    pub fn stats(&self) -> Result<CacheStats> {
        let doc = self.read_document()?;
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            total_entries: doc.len(),
            expired_entries: doc.expired_keys(now_unix()).len(),
            tags: doc.tag_count(),
        })
    }

    // == Document Round-trip ==
    fn read_document(&self) -> Result<CacheDocument> {
        let bytes = self.io.read_file()?;
        CacheDocument::from_bytes(&bytes)
    }

    fn write_document(&self, doc: &CacheDocument) -> Result<()> {
        self.io.write_file(&doc.to_bytes()?)
    }

    /// Looks up a live entry, returning its payload and stored expiration.
    fn lookup(&self, key: &CacheKey) -> Result<(Payload, i64)> {
        let key = key_as_str(key)?;
        let mut doc = self.read_document()?;
        let (value, _, expires_at) = doc.get(key);
        let Some(value) = value.cloned() else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return Err(CacheError::KeyNotFound(key.to_string()));
        };

        if is_past(expires_at, now_unix()) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            if self.collect_on_read {
                self.collect(&mut doc, key);
            }
            return Err(CacheError::KeyNotFound(key.to_string()));
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        Ok((value, expires_at))
    }

    /// Deletes an expired key from an already-loaded document.
    ///
    /// The read that triggered collection has already failed with
    /// `KeyNotFound`; a write failure here is logged and not returned.
    fn collect(&self, doc: &mut CacheDocument, key: &str) {
        doc.delete(key);
        match self.write_document(doc) {
            Ok(()) => debug!(key, "collected expired entry"),
            Err(err) => warn!(key, error = %err, "failed to collect expired entry"),
        }
    }

    fn invalidate_tag(&self, tag: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        let removed = doc.invalidate(tag);
        self.write_document(&doc)?;
        debug!(tag, removed, "invalidated tag");
        Ok(())
    }
}

impl CacheBackend for JsonFileStore {
    // == Get ==
    fn get(&self, key: &CacheKey) -> Result<CacheValue> {
        let (value, _) = self.lookup(key)?;
        Ok(CacheValue::Payload(value))
    }

    fn get_with_ttl(&self, key: &CacheKey) -> Result<(CacheValue, Option<Duration>)> {
        let (value, expires_at) = self.lookup(key)?;
        Ok((CacheValue::Payload(value), remaining(expires_at, now_unix())))
    }

    // == Set ==
    fn set(&self, key: &CacheKey, value: CacheValue, options: Option<Options>) -> Result<()> {
        let key = key_as_str(key)?;
        let payload = match value {
            CacheValue::Payload(payload) => payload,
            other => return Err(CacheError::UnsupportedValueType(other.type_name().to_string())),
        };

        let options = options.unwrap_or_else(|| self.defaults.clone());
        let expires_at = self.zero_ttl.expires_at(now_unix(), options.expiration);

        let mut doc = self.read_document()?;
        doc.set(key, payload, expires_at, &options.tags);
        self.write_document(&doc)?;
        debug!(key, expires_at, tags = ?options.tags, "set entry");
        Ok(())
    }

    // == Delete ==
    fn delete(&self, key: &CacheKey) -> Result<()> {
        let key = key_as_str(key)?;
        let mut doc = self.read_document()?;
        let existed = doc.delete(key);
        self.write_document(&doc)?;
        debug!(key, existed, "deleted entry");
        Ok(())
    }

    // == Invalidate ==
    fn invalidate(&self, options: Option<InvalidateOptions>) -> Result<()> {
        let options = options.unwrap_or_else(|| InvalidateOptions {
            tags: self.defaults.tags.clone(),
        });
        for tag in &options.tags {
            self.invalidate_tag(tag)?;
        }
        Ok(())
    }

    // == Clear ==
    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        info!(path = %self.path().display(), "cleared cache file");
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        self.backend_type
    }
}

fn key_as_str(key: &CacheKey) -> Result<&str> {
    key.as_text()
        .ok_or_else(|| CacheError::UnsupportedKeyType(key.type_name().to_string()))
}
