//! Storage layer for SymLog
//!
//! All persistent state lives in a key-value [`Store`]. Each key holds one
//! JSON document: the profile object, the entry array, or the last-backup
//! metadata. [`FileStore`] keeps one file per key with atomic writes;
//! [`MemoryStore`] backs tests.

pub mod entries;
pub mod file_store;
pub mod keys;
pub mod memory;
pub mod profile;

pub use entries::EntryRepository;
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use profile::ProfileRepository;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SymlogError, SymlogResult};

/// Key-value persistence for raw JSON text
pub trait Store {
    /// Read the value under `key`, `None` if nothing is stored
    fn read(&self, key: &str) -> SymlogResult<Option<String>>;

    /// Replace the value under `key`
    fn write(&self, key: &str, value: &str) -> SymlogResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> SymlogResult<()>;
}

/// Read and parse the JSON document under `key`
pub fn read_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> SymlogResult<Option<T>> {
    match store.read(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SymlogError::Storage(format!("Failed to parse {}: {}", key, e))),
        None => Ok(None),
    }
}

/// Serialize `data` and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(store: &dyn Store, key: &str, data: &T) -> SymlogResult<()> {
    let raw = serde_json::to_string(data)
        .map_err(|e| SymlogError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
    store.write(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        assert_eq!(read_json::<TestData>(&store, "k").unwrap(), None);

        let data = TestData {
            name: "test".into(),
            value: 42,
        };
        write_json(&store, "k", &data).unwrap();
        assert_eq!(read_json::<TestData>(&store, "k").unwrap(), Some(data));
    }

    #[test]
    fn test_read_json_reports_key_on_parse_error() {
        let store = MemoryStore::new();
        store.write("broken", "{not json").unwrap();

        let err = read_json::<TestData>(&store, "broken").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
