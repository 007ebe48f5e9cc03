//! Backup envelope and payload formats
//!
//! The envelope is the exported file. Its metadata is readable without a
//! passphrase; the payload exists only in memory after decryption.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SymlogError, SymlogResult};

/// The one envelope/payload version this build reads and writes
pub const BACKUP_VERSION: &str = "1.0";

/// Minimum passphrase length in characters
pub const MIN_PASSPHRASE_LEN: usize = 6;

/// Conventional backup file extension
pub const BACKUP_EXTENSION: &str = "symlog";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The persisted/exported backup container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEnvelope {
    pub version: String,

    /// ISO-8601 creation time
    pub timestamp: String,

    /// Ciphertext of the payload in the cipher's own text form
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
}

impl BackupEnvelope {
    /// Parse envelope bytes; any failure is `MalformedEnvelope`
    pub fn parse(bytes: &[u8]) -> SymlogResult<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        serde_json::from_slice(bytes).map_err(|e| SymlogError::MalformedEnvelope(e.to_string()))
    }

    /// Pretty JSON, as written to backup files
    pub fn to_json_pretty(&self) -> SymlogResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SymlogError::Json(format!("Failed to serialize backup: {}", e)))
    }
}

/// The plaintext sealed inside `encryptedData`
#[derive(Debug, Clone, Serialize)]
pub struct BackupPayload {
    pub version: String,
    pub timestamp: String,
    pub data: BackupData,
}

/// Application state carried by a payload, as opaque JSON
#[derive(Debug, Clone, Serialize)]
pub struct BackupData {
    pub profile: Option<Value>,
    pub entries: Value,
}

/// Data recovered from a backup, not yet written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredData {
    /// Creation time recorded inside the payload
    pub timestamp: String,
    /// `None` when the backup was made before any profile existed
    pub profile: Option<Value>,
    /// Normally an array; anything else restores no entries
    pub entries: Value,
}

impl RestoredData {
    /// Number of entries this data would restore
    pub fn entry_count(&self) -> usize {
        self.entries.as_array().map_or(0, Vec::len)
    }
}

/// Outcome of applying restored data to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    pub profile_restored: bool,
    pub entries_restored: usize,
    /// Creation time of the backup that was applied
    pub timestamp: String,
}

impl RestoreSummary {
    pub fn summary(&self) -> String {
        let profile = if self.profile_restored {
            "profile restored"
        } else {
            "profile unchanged"
        };
        format!(
            "Restored {} entr{}, {} (backup from {})",
            self.entries_restored,
            if self.entries_restored == 1 { "y" } else { "ies" },
            profile,
            self.timestamp
        )
    }
}

/// Envelope metadata available without a passphrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeInfo {
    pub version: String,
    pub timestamp: String,
    /// Size of the envelope in bytes
    pub size: usize,
}

impl EnvelopeInfo {
    /// Whether this build can restore the envelope
    pub fn is_supported(&self) -> bool {
        self.version == BACKUP_VERSION
    }
}

/// Read envelope metadata without decrypting
pub fn inspect_envelope(envelope_bytes: &[u8]) -> SymlogResult<EnvelopeInfo> {
    let envelope = BackupEnvelope::parse(envelope_bytes)?;
    Ok(EnvelopeInfo {
        version: envelope.version,
        timestamp: envelope.timestamp,
        size: envelope_bytes.len(),
    })
}
