//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check document and store invariants over generated
//! operation sequences.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::backend::CacheBackend;
use crate::cache::expiry::NEVER;
use crate::cache::{CacheDocument, InvalidateOptions, JsonFileStore, Options};
use crate::crypto;
use crate::error::CacheError;
use crate::models::{CacheKey, Payload};

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Generates arbitrary payload bytes
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..128)
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("t[0-3]", 0..3)
}

#[derive(Debug, Clone)]
enum DocOp {
    Set { key: String, tags: Vec<String> },
    Delete { key: String },
    Invalidate { tag: String },
}

fn doc_op_strategy() -> impl Strategy<Value = DocOp> {
    prop_oneof![
        (key_strategy(), tags_strategy()).prop_map(|(key, tags)| DocOp::Set { key, tags }),
        key_strategy().prop_map(|key| DocOp::Delete { key }),
        "t[0-3]".prop_map(|tag| DocOp::Invalidate { tag }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every key reachable through the tag index is a stored item, and the
    // index matches a model of tag memberships.
    #[test]
    fn prop_tag_index_consistency(ops in prop::collection::vec(doc_op_strategy(), 1..60)) {
        let mut doc = CacheDocument::new();
        let mut model: HashMap<String, HashSet<String>> = HashMap::new();

        for op in ops {
            match op {
                DocOp::Set { key, tags } => {
                    doc.set(&key, Payload::new(key.as_bytes().to_vec()), NEVER, &tags);
                    let entry = model.entry(key).or_default();
                    entry.extend(tags);
                }
                DocOp::Delete { key } => {
                    doc.delete(&key);
                    model.remove(&key);
                }
                DocOp::Invalidate { tag } => {
                    doc.invalidate(&tag);
                    model.retain(|_, tags| !tags.contains(&tag));
                }
            }
        }

        prop_assert_eq!(doc.len(), model.len());
        for tag in ["t0", "t1", "t2", "t3"] {
            let mut actual = doc.keys_for_tag(tag);
            actual.sort();
            let mut expected: Vec<String> = model
                .iter()
                .filter(|(_, tags)| tags.contains(tag))
                .map(|(key, _)| key.clone())
                .collect();
            expected.sort();
            prop_assert_eq!(actual, expected, "tag {} membership mismatch", tag);
        }
    }

    // Serialization round-trips any reachable document.
    #[test]
    fn prop_document_roundtrip(
        entries in prop::collection::vec((key_strategy(), bytes_strategy(), 0i64..5_000, tags_strategy()), 0..20)
    ) {
        let mut doc = CacheDocument::new();
        for (key, data, expires_at, tags) in entries {
            doc.set(&key, Payload::new(data), expires_at, &tags);
        }
        let restored = CacheDocument::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(restored, doc);
    }

    // Sealed envelopes open to the original plaintext for every key size.
    #[test]
    fn prop_encryption_roundtrip(
        plaintext in bytes_strategy(),
        size_index in 0usize..3,
        key_byte in any::<u8>()
    ) {
        let key = vec![key_byte; crypto::KEY_SIZES[size_index]];
        let sealed = crypto::seal(&key, &plaintext).unwrap();
        prop_assert_eq!(crypto::open(&key, &sealed).unwrap(), plaintext);
    }

    // Flipping any bit of an envelope is detected.
    #[test]
    fn prop_tamper_detection(
        plaintext in bytes_strategy(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8
    ) {
        let key = [3u8; 32];
        let mut sealed = crypto::seal(&key, &plaintext).unwrap();
        let i = position.index(sealed.len());
        sealed[i] ^= 1 << bit;
        prop_assert!(matches!(crypto::open(&key, &sealed), Err(CacheError::Authentication)));
    }
}

// Fewer cases for tests that touch the filesystem
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Set followed by Get returns the exact bytes, plain or encrypted.
    #[test]
    fn prop_store_roundtrip(
        key in key_strategy(),
        data in bytes_strategy(),
        tags in tags_strategy(),
        ttl in 0u64..3_600,
        encrypted in any::<bool>()
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache");
        let store = if encrypted {
            JsonFileStore::encrypted(path, [5u8; 32], Options::default()).unwrap()
        } else {
            JsonFileStore::new(path, Options::default()).unwrap()
        };

        let opts = Options::new()
            .with_expiration(Duration::from_secs(ttl))
            .with_tags(tags.clone());
        let cache_key = CacheKey::from(key.as_str());
        store.set(&cache_key, data.clone().into(), Some(opts)).unwrap();

        let value = store.get(&cache_key).unwrap();
        prop_assert_eq!(value.as_bytes(), Some(data.as_slice()));

        store.invalidate(Some(InvalidateOptions::new().with_tags(tags.clone()))).unwrap();
        if !tags.is_empty() {
            prop_assert!(store.get(&cache_key).is_err());
        }
    }
}
