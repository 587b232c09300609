//! One-time check that a cache path is usable before a store is built.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::debug;

use super::plain::open_options;
use crate::error::{CacheError, Result};

/// Confirms that `path` can be read and written as a cache file.
///
/// A missing file is created with the cache file mode. An existing path
/// must be a regular file openable for read and write.
pub fn validate_path(path: &Path) -> Result<()> {
    let create = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(CacheError::Path(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(_) => false,
        Err(err) if err.kind() == ErrorKind::NotFound => true,
        Err(err) => return Err(path_error(path, err)),
    };

    open_options(create)
        .open(path)
        .map_err(|err| path_error(path, err))?;
    debug!(path = %path.display(), created = create, "validated cache path");
    Ok(())
}

fn path_error(path: &Path, err: io::Error) -> CacheError {
    let message = format!("{}: {err}", path.display());
    if err.kind() == ErrorKind::PermissionDenied {
        CacheError::Permission(message)
    } else {
        CacheError::Path(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.json");

        validate_path(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(fs::read(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_existing_file_is_accepted_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"{}").unwrap();

        validate_path(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_path(dir.path());
        assert!(matches!(result, Err(CacheError::Path(_))));
    }

    #[test]
    fn test_missing_parent_is_path_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/cache.json");
        assert!(matches!(validate_path(&path), Err(CacheError::Path(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.json");
        fs::write(&path, b"{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        // root bypasses permission bits
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            return;
        }
        assert!(matches!(validate_path(&path), Err(CacheError::Permission(_))));
    }
}
