//! Persistence Module
//!
//! The byte-level port between a cache document and its backing file.
//! The store reads and writes whole files through `FileIo` and never sees
//! whether the bytes were encrypted.

mod encrypted;
mod plain;
mod validate;

pub use encrypted::EncryptedFileIo;
pub use plain::PlainFileIo;
pub use validate::validate_path;

use std::path::Path;

use crate::error::Result;

/// File permission bits for newly created cache files.
pub const CACHE_FILE_MODE: u32 = 0o644;

/// Whole-resource read and write against a single cache file.
pub trait FileIo: Send + Sync {
    /// Reads the full document bytes. A missing file reads as empty.
    fn read_file(&self) -> Result<Vec<u8>>;

    /// Replaces the file contents with `content`.
    fn write_file(&self, content: &[u8]) -> Result<()>;

    /// Path of the backing file.
    fn path(&self) -> &Path;
}
