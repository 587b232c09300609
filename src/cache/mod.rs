//! Cache Module
//!
//! The cache document model, its options, and the file-backed store that
//! drives one document round-trip per operation.

mod document;
pub mod expiry;
mod options;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use document::CacheDocument;
pub use options::{InvalidateOptions, Options, ZeroTtlPolicy};
pub use stats::CacheStats;
pub use store::JsonFileStore;
