//! Whole-dataset operations

use tracing::info;

use crate::error::SymlogResult;
use crate::storage::{keys, EntryRepository, ProfileRepository, Store};

/// Counts of what is currently stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataOverview {
    /// Stored entry elements, readable or not
    pub entries: usize,
    /// Elements this version cannot read, e.g. from a foreign backup
    pub unreadable_entries: usize,
    pub has_profile: bool,
}

pub fn overview(store: &dyn Store) -> SymlogResult<DataOverview> {
    let entries = EntryRepository::new(store);
    Ok(DataOverview {
        entries: entries.count()?,
        unreadable_entries: entries.unreadable_count()?,
        has_profile: ProfileRepository::new(store).exists()?,
    })
}

/// Remove all entries, the profile and the legacy backup slot
///
/// The last-backup metadata is kept. Nothing is parsed, so this works on any
/// stored content.
pub fn wipe_all(store: &dyn Store) -> SymlogResult<()> {
    for key in keys::WIPED_BY_RESET {
        store.remove(key)?;
    }
    info!("all data wiped");
    Ok(())
}
