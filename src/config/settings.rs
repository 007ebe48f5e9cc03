//! User settings for SymLog
//!
//! Manages user preferences: default language and unit system for new
//! profiles, list page size, and backup encryption cost.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::SymlogPaths;
use crate::crypto::key_derivation::KdfCost;
use crate::error::SymlogError;
use crate::models::UnitSystem;

/// Backup settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackupSettings {
    /// Argon2id cost used when sealing new backups
    #[serde(default)]
    pub kdf: KdfCost,

    /// Where `backup create` writes when no output is given
    /// (falls back to the backups directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

/// User settings for SymLog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Language written into newly created profiles
    #[serde(default = "default_language")]
    pub language: String,

    /// Unit system written into newly created profiles
    #[serde(default)]
    pub unit_system: UnitSystem,

    /// Entries shown per page by `entry list`
    #[serde(default = "default_entries_per_page")]
    pub entries_per_page: usize,

    #[serde(default)]
    pub backup: BackupSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_language() -> String {
    "en".to_string()
}

fn default_entries_per_page() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            language: default_language(),
            unit_system: UnitSystem::default(),
            entries_per_page: default_entries_per_page(),
            backup: BackupSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return default settings if the file doesn't exist
    pub fn load_or_create(paths: &SymlogPaths) -> Result<Self, SymlogError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SymlogError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SymlogError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.entries_per_page == 0 {
                return Err(SymlogError::Config(
                    "entries_per_page must be greater than zero".into(),
                ));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SymlogPaths) -> Result<(), SymlogError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SymlogError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SymlogError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Directory that `backup create` writes into by default
    pub fn export_dir(&self, paths: &SymlogPaths) -> PathBuf {
        self.backup
            .export_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }
}
