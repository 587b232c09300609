//! Filecache - An embedded, file-persisted key-value cache
//!
//! Provides tag-based group invalidation, per-entry TTL expiration with
//! lazy collection, and optional AES-GCM encryption at rest. Every
//! operation re-reads and rewrites the whole cache file, so a store is not
//! safe for concurrent writers without external synchronization.

pub mod backend;
pub mod cache;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod persistence;
pub mod tasks;

pub use backend::CacheBackend;
pub use cache::{InvalidateOptions, JsonFileStore, Options, ZeroTtlPolicy};
pub use config::StoreConfig;
pub use error::{CacheError, Result};
pub use models::{CacheKey, CacheValue, Payload};
