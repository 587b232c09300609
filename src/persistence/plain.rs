//! Passthrough file I/O.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{FileIo, CACHE_FILE_MODE};
use crate::error::Result;

/// Reads and writes the document bytes unchanged.
#[derive(Debug, Clone)]
pub struct PlainFileIo {
    path: PathBuf,
}

impl PlainFileIo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FileIo for PlainFileIo {
    fn read_file(&self) -> Result<Vec<u8>> {
        read_or_empty(&self.path)
    }

    fn write_file(&self, content: &[u8]) -> Result<()> {
        write_replacing(&self.path, content)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads a whole file, treating a missing file as empty.
pub(super) fn read_or_empty(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => {
            trace!(path = %path.display(), len = bytes.len(), "read cache file");
            Ok(bytes)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

/// Truncates and rewrites a file, creating it with `CACHE_FILE_MODE`.
pub(super) fn write_replacing(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = open_options(true).truncate(true).open(path)?;
    file.write_all(content)?;
    trace!(path = %path.display(), len = content.len(), "wrote cache file");
    Ok(())
}

/// Read/write open options, optionally creating the file with the cache mode.
pub(super) fn open_options(create: bool) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(create);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CACHE_FILE_MODE);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let io = PlainFileIo::new(dir.path().join("absent.json"));
        assert!(io.read_file().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let io = PlainFileIo::new(dir.path().join("cache.json"));

        io.write_file(b"{\"items\":{}}").unwrap();
        assert_eq!(io.read_file().unwrap(), b"{\"items\":{}}");

        io.write_file(b"{}").unwrap();
        assert_eq!(io.read_file().unwrap(), b"{}", "shorter writes truncate");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        PlainFileIo::new(&path).write_file(b"{}").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !CACHE_FILE_MODE, 0);
    }
}
