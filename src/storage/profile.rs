//! Profile repository

use crate::error::SymlogResult;
use crate::models::Profile;

use super::{keys, read_json, write_json, Store};

/// Repository for the single stored profile
pub struct ProfileRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// The stored profile, `None` if none was ever saved
    pub fn get(&self) -> SymlogResult<Option<Profile>> {
        read_json(self.store, keys::PROFILE)
    }

    pub fn save(&self, profile: &Profile) -> SymlogResult<()> {
        write_json(self.store, keys::PROFILE, profile)
    }

    pub fn exists(&self) -> SymlogResult<bool> {
        Ok(self.store.read(keys::PROFILE)?.is_some())
    }

    pub fn remove(&self) -> SymlogResult<()> {
        self.store.remove(keys::PROFILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_save_get_remove() {
        let store = MemoryStore::new();
        let repo = ProfileRepository::new(&store);
        assert_eq!(repo.get().unwrap(), None);
        assert!(!repo.exists().unwrap());

        let mut profile = Profile::default();
        profile.personal_info.name = "Ada".into();
        repo.save(&profile).unwrap();

        assert_eq!(repo.get().unwrap(), Some(profile));
        assert!(repo.exists().unwrap());

        repo.remove().unwrap();
        assert_eq!(repo.get().unwrap(), None);
    }
}
