//! Backup codec
//!
//! Produces and consumes [`BackupEnvelope`]s. The codec holds no state of its
//! own: each operation is a function of its inputs and the store contents at
//! call time. Restoring is two explicit steps, [`BackupCodec::restore_backup`]
//! (decrypt and validate, no writes) then [`BackupCodec::apply_restored_data`]
//! (overwrite the store), so an interrupted restore leaves the store untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::crypto::PassphraseCipher;
use crate::error::{SymlogError, SymlogResult};
use crate::storage::{keys, read_json, Store};

use super::envelope::{
    inspect_envelope, BackupData, BackupEnvelope, BackupPayload, EnvelopeInfo, RestoreSummary,
    RestoredData, BACKUP_VERSION, MIN_PASSPHRASE_LEN,
};

/// Creates, inspects and restores encrypted backups
pub struct BackupCodec<'a> {
    store: &'a dyn Store,
    cipher: &'a dyn PassphraseCipher,
}

impl<'a> BackupCodec<'a> {
    pub fn new(store: &'a dyn Store, cipher: &'a dyn PassphraseCipher) -> Self {
        Self { store, cipher }
    }

    /// Seal the current profile and entries into a new envelope
    ///
    /// Only reads the store. Writing the envelope out is the caller's job.
    pub fn create_backup(&self, passphrase: &str) -> SymlogResult<BackupEnvelope> {
        self.create_backup_at(passphrase, Utc::now())
    }

    /// [`create_backup`](Self::create_backup) with an explicit creation time
    pub fn create_backup_at(
        &self,
        passphrase: &str,
        now: DateTime<Utc>,
    ) -> SymlogResult<BackupEnvelope> {
        validate_passphrase(passphrase)?;

        let profile = self.read_raw(keys::PROFILE)?.filter(|v| !v.is_null());
        let entries = self
            .read_raw(keys::ENTRIES)?
            .unwrap_or_else(|| Value::Array(Vec::new()));

        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let entry_count = entries.as_array().map_or(0, Vec::len);

        let payload = BackupPayload {
            version: BACKUP_VERSION.to_string(),
            timestamp: timestamp.clone(),
            data: BackupData { profile, entries },
        };

        let plaintext = Zeroizing::new(
            serde_json::to_vec(&payload)
                .map_err(|e| SymlogError::Json(format!("Failed to serialize backup: {}", e)))?,
        );
        let encrypted_data = self.cipher.seal(&plaintext, passphrase)?;

        info!(
            entries = entry_count,
            has_profile = payload.data.profile.is_some(),
            %timestamp,
            "backup created"
        );

        Ok(BackupEnvelope {
            version: BACKUP_VERSION.to_string(),
            timestamp,
            encrypted_data,
        })
    }

    /// Decrypt and validate a backup without touching the store
    pub fn restore_backup(
        &self,
        envelope_bytes: &[u8],
        passphrase: &str,
    ) -> SymlogResult<RestoredData> {
        let envelope = BackupEnvelope::parse(envelope_bytes)?;

        if envelope.version != BACKUP_VERSION {
            return Err(SymlogError::UnsupportedVersion {
                found: envelope.version,
                expected: BACKUP_VERSION,
            });
        }

        let payload = self.open_payload(&envelope.encrypted_data, passphrase)?;
        let restored = validate_payload(payload, &envelope.timestamp)?;

        info!(
            entries = restored.entry_count(),
            has_profile = restored.profile.is_some(),
            timestamp = %restored.timestamp,
            "backup decrypted"
        );

        Ok(restored)
    }

    /// Overwrite the store with restored data
    ///
    /// The profile is written only when present and entries only when they
    /// are an array. Whatever was stored before is discarded, not merged.
    /// If the entries write fails after the profile was written, the previous
    /// profile is put back before the error is returned.
    pub fn apply_restored_data(&self, restored: &RestoredData) -> SymlogResult<RestoreSummary> {
        let profile_json = restored
            .profile
            .as_ref()
            .filter(|p| !p.is_null())
            .map(serde_json::to_string)
            .transpose()?;

        let entries_json = match &restored.entries {
            Value::Array(_) => Some(serde_json::to_string(&restored.entries)?),
            _ => None,
        };

        // Held so a failed entries write can put the old profile back
        let previous_profile = match (&profile_json, &entries_json) {
            (Some(_), Some(_)) => Some(self.store.read(keys::PROFILE)?),
            _ => None,
        };

        if let Some(json) = &profile_json {
            self.store.write(keys::PROFILE, json)?;
        }
        if let Some(json) = &entries_json {
            if let Err(e) = self.store.write(keys::ENTRIES, json) {
                if let Some(previous) = previous_profile {
                    self.roll_back_profile(previous);
                }
                return Err(e);
            }
        }

        let summary = RestoreSummary {
            profile_restored: profile_json.is_some(),
            entries_restored: if entries_json.is_some() {
                restored.entry_count()
            } else {
                0
            },
            timestamp: restored.timestamp.clone(),
        };

        info!(
            entries = summary.entries_restored,
            profile = summary.profile_restored,
            "backup applied"
        );

        Ok(summary)
    }

    /// Envelope metadata, no passphrase needed; never touches the store
    pub fn inspect_envelope(&self, envelope_bytes: &[u8]) -> SymlogResult<EnvelopeInfo> {
        inspect_envelope(envelope_bytes)
    }

    fn roll_back_profile(&self, previous: Option<String>) {
        let undone = match &previous {
            Some(raw) => self.store.write(keys::PROFILE, raw),
            None => self.store.remove(keys::PROFILE),
        };
        match undone {
            Ok(()) => warn!("entries write failed, profile rolled back"),
            Err(e) => warn!(error = %e, "entries write failed and profile rollback failed"),
        }
    }

    fn read_raw(&self, key: &str) -> SymlogResult<Option<Value>> {
        read_json(self.store, key)
    }

    /// Every failure in here is reported as the same `DecryptionFailed`
    fn open_payload(&self, encrypted_data: &str, passphrase: &str) -> SymlogResult<Value> {
        let plaintext = match self.cipher.open(encrypted_data, passphrase) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(_) => {
                warn!("backup decryption failed");
                return Err(SymlogError::DecryptionFailed);
            }
        };

        if plaintext.is_empty() {
            warn!("backup decryption failed");
            return Err(SymlogError::DecryptionFailed);
        }

        serde_json::from_slice(&plaintext).map_err(|_| {
            warn!("backup decryption failed");
            SymlogError::DecryptionFailed
        })
    }
}

/// Reject a missing or too-short passphrase before any work is done
pub fn validate_passphrase(passphrase: &str) -> SymlogResult<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(SymlogError::InvalidPassphrase {
            min_len: MIN_PASSPHRASE_LEN,
        });
    }
    Ok(())
}

fn validate_payload(payload: Value, envelope_timestamp: &str) -> SymlogResult<RestoredData> {
    let Value::Object(mut payload) = payload else {
        return Err(SymlogError::MalformedPayload(
            "payload is not an object".into(),
        ));
    };

    match payload.get("version").and_then(Value::as_str) {
        Some(BACKUP_VERSION) => {}
        Some(other) => {
            return Err(SymlogError::MalformedPayload(format!(
                "payload version '{}' does not match envelope",
                other
            )))
        }
        None => return Err(SymlogError::MalformedPayload("missing payload version".into())),
    }

    let timestamp = payload
        .get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or(envelope_timestamp)
        .to_string();

    let Some(Value::Object(mut data)) = payload.remove("data") else {
        return Err(SymlogError::MalformedPayload(
            "missing data object".into(),
        ));
    };

    let profile = data.remove("profile").filter(|p| !p.is_null());
    let entries = data.remove("entries").unwrap_or(Value::Null);

    Ok(RestoredData {
        timestamp,
        profile,
        entries,
    })
}
