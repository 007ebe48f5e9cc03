//! Passphrase-keyed sealing
//!
//! `PassphraseCipher` is the capability the backup codec is written against.
//! `AesGcmCipher` implements it with Argon2id + AES-256-GCM and emits a single
//! opaque string: base64 of a JSON box holding the salt, the Argon2 cost, the
//! nonce and the ciphertext. The box header is bound into the AES-GCM tag as
//! associated data, so editing the recorded cost fails authentication.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{SymlogError, SymlogResult};

use super::key_derivation::{derive_key, random_salt, KdfCost};

/// Box layout revision
const SEAL_FORMAT: u8 = 1;

/// 96-bit AES-GCM nonce
const NONCE_LEN: usize = 12;

/// Symmetric authenticated encryption keyed by a passphrase
pub trait PassphraseCipher {
    /// Encrypt `plaintext`, returning an opaque text form
    fn seal(&self, plaintext: &[u8], passphrase: &str) -> SymlogResult<String>;

    /// Reverse `seal`. Must fail, not return garbage, for a wrong passphrase.
    fn open(&self, sealed: &str, passphrase: &str) -> SymlogResult<Vec<u8>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SealedBox {
    format: u8,
    salt: String,
    kdf: KdfCost,
    nonce: String,
    ciphertext: String,
}

impl SealedBox {
    /// Header bytes authenticated alongside the ciphertext
    fn associated_data(&self) -> Vec<u8> {
        format!(
            "symlog-seal/{}/argon2id/m={},t={},p={}/{}",
            self.format,
            self.kdf.memory_cost,
            self.kdf.time_cost,
            self.kdf.parallelism,
            self.salt
        )
        .into_bytes()
    }
}

/// Argon2id key derivation with AES-256-GCM
#[derive(Debug, Clone, Default)]
pub struct AesGcmCipher {
    cost: KdfCost,
}

impl AesGcmCipher {
    /// Create a cipher that seals with the given Argon2id cost
    pub fn new(cost: KdfCost) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> KdfCost {
        self.cost
    }
}

impl PassphraseCipher for AesGcmCipher {
    fn seal(&self, plaintext: &[u8], passphrase: &str) -> SymlogResult<String> {
        let salt = random_salt();
        let key = derive_key(passphrase, &salt, &self.cost)?;
        let aead = Aes256Gcm::new(key.as_bytes().into());
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let mut sealed = SealedBox {
            format: SEAL_FORMAT,
            salt: STANDARD.encode(salt),
            kdf: self.cost,
            nonce: STANDARD.encode(nonce),
            ciphertext: String::new(),
        };
        let aad = sealed.associated_data();

        let ciphertext = aead
            .encrypt(&nonce, Payload { msg: plaintext, aad: &aad })
            .map_err(|e| SymlogError::Encryption(format!("Encryption failed: {}", e)))?;
        sealed.ciphertext = STANDARD.encode(ciphertext);

        let encoded = serde_json::to_vec(&sealed)
            .map_err(|e| SymlogError::Encryption(format!("Failed to encode sealed box: {}", e)))?;
        Ok(STANDARD.encode(encoded))
    }

    fn open(&self, sealed: &str, passphrase: &str) -> SymlogResult<Vec<u8>> {
        let raw = decode_field("sealed data", sealed.trim())?;
        let sealed: SealedBox = serde_json::from_slice(&raw)
            .map_err(|e| SymlogError::Encryption(format!("Invalid sealed box: {}", e)))?;

        if sealed.format != SEAL_FORMAT {
            return Err(SymlogError::Encryption(format!(
                "Unsupported sealed box format: {}",
                sealed.format
            )));
        }
        // Derive at the recorded cost, not the local setting
        sealed.kdf.check_bounds()?;

        let nonce = decode_field("nonce", &sealed.nonce)?;
        if nonce.len() != NONCE_LEN {
            return Err(SymlogError::Encryption(format!(
                "Invalid nonce length: expected {}, got {}",
                NONCE_LEN,
                nonce.len()
            )));
        }
        let salt = decode_field("salt", &sealed.salt)?;
        let ciphertext = decode_field("ciphertext", &sealed.ciphertext)?;

        let key = derive_key(passphrase, &salt, &sealed.kdf)?;
        let aad = sealed.associated_data();

        Aes256Gcm::new(key.as_bytes().into())
            .decrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &ciphertext,
                    aad: &aad,
                },
            )
            .map_err(|_| SymlogError::Encryption("Authentication failed".into()))
    }
}

fn decode_field(name: &str, value: &str) -> SymlogResult<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| SymlogError::Encryption(format!("Invalid {} encoding: {}", name, e)))
}
