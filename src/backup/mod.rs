//! Encrypted backup and restore
//!
//! A backup is a [`BackupEnvelope`]: a small JSON document whose version and
//! timestamp are readable by anyone and whose `encryptedData` holds the
//! profile and entries sealed under a passphrase.
//!
//! # Restore
//!
//! Restoring is split in two so nothing is written until the backup has been
//! fully decrypted and validated:
//!
//! - [`BackupCodec::restore_backup`]: parse, version check, decrypt, validate
//! - [`BackupCodec::apply_restored_data`]: overwrite the store
//!
//! # Example
//!
//! ```rust,ignore
//! use symlog::backup::BackupCodec;
//! use symlog::crypto::AesGcmCipher;
//!
//! let codec = BackupCodec::new(&store, &cipher);
//! let envelope = codec.create_backup("secret1")?;
//!
//! let restored = codec.restore_backup(envelope.to_json_pretty()?.as_bytes(), "secret1")?;
//! println!("{}", codec.apply_restored_data(&restored)?.summary());
//! ```

mod codec;
mod envelope;
mod export;

pub use codec::{validate_passphrase, BackupCodec};
pub use envelope::{
    inspect_envelope, BackupData, BackupEnvelope, BackupPayload, EnvelopeInfo, RestoreSummary,
    RestoredData, BACKUP_EXTENSION, BACKUP_VERSION, MIN_PASSPHRASE_LEN,
};
pub use export::{
    default_backup_filename, last_backup_info, read_backup_file, record_last_backup,
    write_backup_file, ExportedBackup, LastBackupInfo,
};
