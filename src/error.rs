//! Custom error types for SymLog
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The backup variants form a closed taxonomy:
//! every backup operation fails with exactly one of them.

use thiserror::Error;

/// Message shown for every decryption failure, whatever the underlying cause
pub const DECRYPTION_FAILED_MESSAGE: &str = "Wrong passphrase or corrupted backup file";

/// The main error type for SymLog operations
#[derive(Error, Debug)]
pub enum SymlogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Low-level encryption errors (key derivation, cipher setup)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup passphrase missing or too short
    #[error("Passphrase must be at least {min_len} characters long")]
    InvalidPassphrase { min_len: usize },

    /// Backup file is not a valid envelope
    #[error("Invalid backup file format: {0}")]
    MalformedEnvelope(String),

    /// Backup envelope version is not the supported one
    #[error("Incompatible backup version: found '{found}', expected '{expected}'")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },

    /// Decryption failed. Deliberately carries no detail.
    #[error("{}", DECRYPTION_FAILED_MESSAGE)]
    DecryptionFailed,

    /// Decrypted payload does not have the expected structure
    #[error("Invalid backup file structure: {0}")]
    MalformedPayload(String),
}

impl SymlogError {
    /// Create a "not found" error for entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error belongs to the backup failure taxonomy
    pub fn is_backup_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidPassphrase { .. }
                | Self::MalformedEnvelope(_)
                | Self::UnsupportedVersion { .. }
                | Self::DecryptionFailed
                | Self::MalformedPayload(_)
        )
    }
}

impl From<std::io::Error> for SymlogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SymlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SymLog operations
pub type SymlogResult<T> = Result<T, SymlogError>;
