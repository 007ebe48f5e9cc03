//! SymLog - personal health-symptom diary
//!
//! This library provides the core functionality for the SymLog diary:
//! recording symptom, medication, diary and test-result entries, keeping a
//! personal/medical profile, generating text reports, and exporting all of
//! it as a passphrase-encrypted backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (entries, profile)
//! - `storage`: Key-value store and typed repositories
//! - `crypto`: Argon2id + AES-256-GCM passphrase sealing
//! - `backup`: Encrypted backup envelopes, create and restore
//! - `services`: Business logic layer
//! - `reports`: Health report generation
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use symlog::backup::BackupCodec;
//! use symlog::config::{Settings, SymlogPaths};
//! use symlog::crypto::AesGcmCipher;
//! use symlog::storage::FileStore;
//!
//! let paths = SymlogPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = FileStore::new(paths.data_dir())?;
//!
//! let cipher = AesGcmCipher::new(settings.backup.kdf);
//! let envelope = BackupCodec::new(&store, &cipher).create_backup("secret1")?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SymlogError, SymlogResult};
