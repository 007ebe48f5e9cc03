//! Path management for SymLog
//!
//! ## Path Resolution Order
//!
//! 1. `SYMLOG_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/symlog` on Linux, `~/Library/Application Support/symlog`
//!    on macOS, `%APPDATA%\symlog\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SymlogError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SYMLOG_DATA_DIR";

/// Manages all paths used by SymLog
#[derive(Debug, Clone)]
pub struct SymlogPaths {
    base_dir: PathBuf,
}

impl SymlogPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SymlogError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SymlogPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON document per store key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for exported backup files
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), SymlogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SymlogError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SymlogError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| SymlogError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, SymlogError> {
    ProjectDirs::from("", "", "symlog")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SymlogError::Config("Could not determine home directory".into()))
}
