//! Entry repository
//!
//! The entry collection is one ordered JSON array under a single key; entries
//! are not individually addressable in the store. Every mutation rewrites the
//! whole array, preserving the order of untouched entries.
//!
//! Restored backups can carry elements this version cannot read. Those are
//! skipped on read with a warning but kept in the array, byte for byte, until
//! they are deleted or the data is wiped.

use serde_json::Value;
use tracing::warn;

use crate::error::{SymlogError, SymlogResult};
use crate::models::{Entry, EntryId};

use super::{keys, read_json, write_json, Store};

/// Repository for the entry collection
pub struct EntryRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> EntryRepository<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// The stored array as-is
    fn raw(&self) -> SymlogResult<Vec<Value>> {
        match read_json::<Value>(self.store, keys::ENTRIES)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(SymlogError::Storage(format!(
                "{} does not hold an array",
                keys::ENTRIES
            ))),
        }
    }

    /// All readable entries in stored order
    pub fn get_all(&self) -> SymlogResult<Vec<Entry>> {
        let raw = self.raw()?;
        let mut entries = Vec::with_capacity(raw.len());
        let mut skipped = 0;

        for (index, item) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Entry>(item) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    skipped += 1;
                    warn!(index, error = %e, "skipping unreadable entry");
                }
            }
        }
        if skipped > 0 {
            warn!(skipped, "some stored entries could not be read");
        }

        Ok(entries)
    }

    /// Stored elements that do not parse as entries
    pub fn unreadable_count(&self) -> SymlogResult<usize> {
        Ok(self
            .raw()?
            .into_iter()
            .filter(|item| serde_json::from_value::<Entry>(item.clone()).is_err())
            .count())
    }

    pub fn get(&self, id: EntryId) -> SymlogResult<Option<Entry>> {
        Ok(self.get_all()?.into_iter().find(|e| e.id == id))
    }

    /// Highest id in the collection, counting elements that only carry an id
    pub fn latest_id(&self) -> SymlogResult<Option<EntryId>> {
        Ok(self
            .raw()?
            .iter()
            .filter_map(raw_id)
            .max()
            .map(EntryId::from_raw))
    }

    /// Replace the entry with the same id in place, or append it
    pub fn upsert(&self, entry: Entry) -> SymlogResult<()> {
        let mut raw = self.raw()?;
        let value = serde_json::to_value(&entry)?;

        match raw.iter_mut().find(|item| raw_id(item) == Some(entry.id.as_i64())) {
            Some(existing) => *existing = value,
            None => raw.push(value),
        }
        write_json(self.store, keys::ENTRIES, &raw)
    }

    /// Delete every element with this id, returning whether one existed
    pub fn delete(&self, id: EntryId) -> SymlogResult<bool> {
        let mut raw = self.raw()?;
        let before = raw.len();
        raw.retain(|item| raw_id(item) != Some(id.as_i64()));

        if raw.len() == before {
            return Ok(false);
        }
        write_json(self.store, keys::ENTRIES, &raw)?;
        Ok(true)
    }

    /// Number of stored elements, readable or not
    pub fn count(&self) -> SymlogResult<usize> {
        Ok(self.raw()?.len())
    }
}

fn raw_id(item: &Value) -> Option<i64> {
    item.get("id").and_then(Value::as_i64)
}
