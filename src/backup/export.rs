//! Backup files on disk
//!
//! Writing envelopes out as pretty JSON, reading them back, and the
//! last-backup metadata kept in the store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{SymlogError, SymlogResult};
use crate::storage::file_store::write_atomic;
use crate::storage::{keys, read_json, write_json, Store};

use super::envelope::{BackupEnvelope, BACKUP_EXTENSION};

/// Metadata about the most recent exported backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastBackupInfo {
    /// Envelope timestamp of the backup
    pub timestamp: String,
    /// File size in bytes
    pub size: u64,
}

/// Result of writing a backup file
#[derive(Debug, Clone)]
pub struct ExportedBackup {
    pub path: PathBuf,
    pub info: LastBackupInfo,
}

/// `symlog_backup_<YYYY-MM-DD>.symlog`
pub fn default_backup_filename(date: NaiveDate) -> String {
    format!(
        "symlog_backup_{}.{}",
        date.format("%Y-%m-%d"),
        BACKUP_EXTENSION
    )
}

/// Write `envelope` as pretty JSON
///
/// When `target` is an existing directory the file gets the default name
/// for the envelope's date, with a numeric suffix if that name is taken.
pub fn write_backup_file(envelope: &BackupEnvelope, target: &Path) -> SymlogResult<ExportedBackup> {
    let path = if target.is_dir() {
        unique_path(target, envelope_date(envelope))
    } else {
        target.to_path_buf()
    };

    let contents = envelope.to_json_pretty()?;
    write_atomic(&path, contents.as_bytes())?;

    let info = LastBackupInfo {
        timestamp: envelope.timestamp.clone(),
        size: contents.len() as u64,
    };
    info!(path = %path.display(), size = info.size, "backup file written");

    Ok(ExportedBackup { path, info })
}

/// Read a backup file's bytes
///
/// Any extension is accepted; ones other than `.symlog` or `.json` are
/// logged.
pub fn read_backup_file(path: &Path) -> SymlogResult<Vec<u8>> {
    if !path.is_file() {
        return Err(SymlogError::NotFound {
            entity_type: "Backup file",
            identifier: path.display().to_string(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some(BACKUP_EXTENSION) | Some("json") => {}
        _ => warn!(path = %path.display(), "unexpected backup file extension"),
    }

    fs::read(path).map_err(|e| {
        SymlogError::Io(format!(
            "Failed to read backup file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Remember the last exported backup
pub fn record_last_backup(store: &dyn Store, info: &LastBackupInfo) -> SymlogResult<()> {
    write_json(store, keys::LAST_BACKUP_INFO, info)
}

/// The last exported backup, if any was recorded
pub fn last_backup_info(store: &dyn Store) -> SymlogResult<Option<LastBackupInfo>> {
    read_json(store, keys::LAST_BACKUP_INFO)
}

fn envelope_date(envelope: &BackupEnvelope) -> NaiveDate {
    DateTime::parse_from_rfc3339(&envelope.timestamp)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .unwrap_or_else(|_| Utc::now().date_naive())
}

fn unique_path(dir: &Path, date: NaiveDate) -> PathBuf {
    let first = dir.join(default_backup_filename(date));
    if !first.exists() {
        return first;
    }

    let stem = format!("symlog_backup_{}", date.format("%Y-%m-%d"));
    (2..)
        .map(|n| dir.join(format!("{}-{}.{}", stem, n, BACKUP_EXTENSION)))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn envelope() -> BackupEnvelope {
        BackupEnvelope {
            version: "1.0".into(),
            timestamp: "2024-06-10T10:00:00.000Z".into(),
            encrypted_data: "abc".into(),
        }
    }

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(default_backup_filename(date), "symlog_backup_2024-06-10.symlog");
    }

    #[test]
    fn test_write_into_directory_uses_default_name() {
        let temp_dir = TempDir::new().unwrap();

        let first = write_backup_file(&envelope(), temp_dir.path()).unwrap();
        let second = write_backup_file(&envelope(), temp_dir.path()).unwrap();

        assert_eq!(
            first.path.file_name().unwrap(),
            "symlog_backup_2024-06-10.symlog"
        );
        assert_eq!(
            second.path.file_name().unwrap(),
            "symlog_backup_2024-06-10-2.symlog"
        );
        assert_eq!(first.info.timestamp, "2024-06-10T10:00:00.000Z");
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mine.json");

        let exported = write_backup_file(&envelope(), &path).unwrap();
        assert_eq!(exported.path, path);

        let bytes = read_backup_file(&path).unwrap();
        assert_eq!(bytes.len() as u64, exported.info.size);
        assert_eq!(BackupEnvelope::parse(&bytes).unwrap(), envelope());

        // pretty printed
        assert!(String::from_utf8(bytes).unwrap().contains("\n  \"version\""));
    }

    #[test]
    fn test_read_other_extension_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.txt");
        fs::write(&path, "{}").unwrap();

        assert_eq!(read_backup_file(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_backup_file(&temp_dir.path().join("nope.symlog")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_last_backup_info() {
        let store = MemoryStore::new();
        assert_eq!(last_backup_info(&store).unwrap(), None);

        let info = LastBackupInfo {
            timestamp: "2024-06-10T10:00:00.000Z".into(),
            size: 512,
        };
        record_last_backup(&store, &info).unwrap();

        assert_eq!(last_backup_info(&store).unwrap(), Some(info));
    }
}
