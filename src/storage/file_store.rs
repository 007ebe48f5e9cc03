//! File-backed store with atomic writes
//!
//! Each key maps to `<data_dir>/<key>.json`. A write lands in a temp file in
//! the same directory and is renamed over the target, so a crash leaves
//! either the old document or the new one.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SymlogError, SymlogResult};

use super::Store;

/// Store keeping one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> SymlogResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SymlogError::Storage(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> SymlogResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(SymlogError::Storage(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> SymlogResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| SymlogError::Storage(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn write(&self, key: &str, value: &str) -> SymlogResult<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value.as_bytes())?;
        debug!(key, bytes = value.len(), "store write");
        Ok(())
    }

    fn remove(&self, key: &str) -> SymlogResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                SymlogError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
            debug!(key, "store remove");
        }
        Ok(())
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic(path: &Path, contents: &[u8]) -> SymlogResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SymlogError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SymlogError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| SymlogError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SymlogError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SymlogError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SymlogError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        assert_eq!(store.read("symlog_entries").unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("symlog_entries", "[1,2,3]").unwrap();
        assert_eq!(store.read("symlog_entries").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(temp_dir.path().join("symlog_entries.json").exists());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("symlog_profile", "{}").unwrap();

        assert!(!temp_dir.path().join("symlog_profile.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(&dir).unwrap();

        store.write("k", "1").unwrap();
        assert!(dir.join("k.json").exists());
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("k", "1").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);

        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        assert!(store.write("../escape", "1").is_err());
        assert!(store.read("").is_err());
    }
}
