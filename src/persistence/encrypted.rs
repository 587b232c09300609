//! Encrypting file I/O.
//!
//! Files hold the hex encoding of a sealed envelope so the cache file stays
//! printable text.

use std::fmt;
use std::path::{Path, PathBuf};

use super::plain::{read_or_empty, write_replacing};
use super::FileIo;
use crate::crypto;
use crate::error::{CacheError, Result};

/// Seals documents on write and opens them on read.
#[derive(Clone)]
pub struct EncryptedFileIo {
    path: PathBuf,
    key: Vec<u8>,
}

impl EncryptedFileIo {
    /// Creates the port, rejecting keys the cipher does not accept.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        crypto::validate_key(&key)?;
        Ok(Self {
            path: path.into(),
            key,
        })
    }
}

impl fmt::Debug for EncryptedFileIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedFileIo")
            .field("path", &self.path)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl FileIo for EncryptedFileIo {
    fn read_file(&self) -> Result<Vec<u8>> {
        let encoded = read_or_empty(&self.path)?;
        let encoded = encoded.trim_ascii();
        if encoded.is_empty() {
            return Ok(Vec::new());
        }
        let sealed = hex::decode(encoded)
            .map_err(|err| CacheError::Format(format!("cache file is not hex: {err}")))?;
        crypto::open(&self.key, &sealed)
    }

    fn write_file(&self, content: &[u8]) -> Result<()> {
        let sealed = crypto::seal(&self.key, content)?;
        write_replacing(&self.path, hex::encode(sealed).as_bytes())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
