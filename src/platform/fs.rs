// SkuFinder - platform/fs.rs
//
// Thin filesystem helpers used by the app layer to back the core
// `DatasetSource` trait and to write export artifacts.

use std::io;
use std::path::Path;

/// Read a file fully, returning `Ok(None)` if it does not exist.
///
/// Directories and other non-file entries are reported as absent so that a
/// folder named `old_products.csv` does not shadow the next encoding.
pub fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    if !path.is_file() {
        return Ok(None);
    }
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write `bytes` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::debug!(dir = %parent.display(), "Created export directory");
        }
    }
    std::fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_if_exists(&dir.path().join("absent.csv")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_directory_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("old_products.xlsx")).unwrap();
        assert!(read_if_exists(&dir.path().join("old_products.xlsx"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("nested").join("a.bin");
        write_file(&target, b"abc").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"abc");
    }
}
