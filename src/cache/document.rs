//! Cache Document Module
//!
//! The complete persisted cache state: items, their expirations and the tag
//! index. Only this type knows how tags and expirations are kept consistent.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::cache::expiry::{is_past, NEVER};
use crate::error::Result;
use crate::models::Payload;

// == Cache Document ==
/// Full in-memory snapshot of a cache file.
///
/// All three fields are required and unknown fields are rejected, so a
/// foreign JSON file fails to parse instead of reading as an empty cache
/// that the next write would overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheDocument {
    /// Tag to keys index
    tags: BTreeMap<String, BTreeSet<String>>,
    /// Absolute expiration instants (Unix seconds) for keys set with one
    expirations: BTreeMap<String, i64>,
    /// Cached payloads
    items: BTreeMap<String, Payload>,
}

impl CacheDocument {
    // == Constructor ==
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // == Deserialize ==
    /// Parses a document from its JSON bytes.
    ///
    /// Empty input yields an empty document so a fresh file needs no
    /// bootstrapping. Malformed input fails with `CacheError::Format`.
    pub fn from_bytes(source: &[u8]) -> Result<Self> {
        if source.is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_slice(source)?)
    }

    // == Serialize ==
    /// Serializes the full document to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    // == Set ==
    /// Inserts or overwrites an item and associates it with `tags`.
    ///
    /// `expires_at == NEVER` leaves any previous expiration of the key in
    /// place.
    pub fn set(&mut self, key: &str, value: Payload, expires_at: i64, tags: &[String]) {
        self.items.insert(key.to_string(), value);
        if expires_at != NEVER {
            self.expirations.insert(key.to_string(), expires_at);
        }
        self.set_tags(key, tags);
    }

    /// Adds `key` to each tag set. No-op for unknown keys or empty tag lists.
    fn set_tags(&mut self, key: &str, tags: &[String]) {
        if !self.items.contains_key(key) || tags.is_empty() {
            return;
        }
        for tag in tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    // == Get ==
    /// Looks up an item without mutating state.
    ///
    /// Returns the value, whether the key exists, and its stored expiration
    /// (`NEVER` when none). Expiry policy is left to the caller.
    pub fn get(&self, key: &str) -> (Option<&Payload>, bool, i64) {
        let value = self.items.get(key);
        let expires_at = self.expirations.get(key).copied().unwrap_or(NEVER);
        (value, value.is_some(), expires_at)
    }

    // == Delete ==
    /// Removes a key from items, expirations and every tag set.
    ///
    /// Returns whether the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.items.remove(key).is_some();
        self.expirations.remove(key);
        for keys in self.tags.values_mut() {
            keys.remove(key);
        }
        self.tags.retain(|_, keys| !keys.is_empty());
        existed
    }

    // == Tag Lookup ==
    /// Returns all keys associated with `tag`; empty if the tag is unknown.
    pub fn keys_for_tag(&self, tag: &str) -> Vec<String> {
        self.tags
            .get(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    // == Invalidate ==
    /// Deletes every key associated with `tag`.
    ///
    /// Returns the number of items removed.
    pub fn invalidate(&mut self, tag: &str) -> usize {
        let mut removed = 0;
        for key in self.keys_for_tag(tag) {
            if self.delete(&key) {
                removed += 1;
            }
        }
        removed
    }

    // == Expired Keys ==
    /// Keys whose expiration lies before `now`.
    pub fn expired_keys(&self, now: i64) -> Vec<String> {
        self.expirations
            .iter()
            .filter(|(_, &expires_at)| is_past(expires_at, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Purge Expired ==
    /// Removes every logically-expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: i64) -> usize {
        let expired = self.expired_keys(now);
        for key in &expired {
            self.delete(key);
        }
        expired.len()
    }

    // == Length ==
    /// Returns the number of stored items, expired or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    // == Is Empty ==
    /// Returns true if the document holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of tags with at least one member.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}
