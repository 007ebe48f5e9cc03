//! Cryptographic functions for SymLog
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation for
//! passphrase-protected backups.

pub mod cipher;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{AesGcmCipher, PassphraseCipher};
pub use key_derivation::{derive_key, random_salt, DerivedKey, KdfCost};
pub use secure_memory::SecureString;
