//! In-memory store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{SymlogError, SymlogResult};

use super::Store;

/// Store holding everything in a map; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> SymlogResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| SymlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> SymlogResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SymlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SymlogResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SymlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.write("a", "1").unwrap();
        store.write("a", "2").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert_eq!(store.read("a").unwrap(), None);
    }
}
