//! Argon2id passphrase stretching
//!
//! Keys are derived straight into a zeroizing buffer from a raw random salt.
//! The cost used for a backup is recorded next to its ciphertext, so every
//! value read back from a file goes through [`KdfCost::check_bounds`] first.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SymlogError, SymlogResult};

/// Bytes of random salt per backup
pub const SALT_LEN: usize = 16;

/// AES-256 key size
pub const KEY_LEN: usize = 32;

/// Upper bound on memory cost accepted from a backup file (1 GiB)
pub const MAX_MEMORY_COST: u32 = 1024 * 1024;
/// Upper bound on iterations accepted from a backup file
pub const MAX_TIME_COST: u32 = 16;
/// Upper bound on lanes accepted from a backup file
pub const MAX_PARALLELISM: u32 = 16;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfCost {
    /// Memory in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for KdfCost {
    fn default() -> Self {
        Self {
            memory_cost: 64 * 1024,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KdfCost {
    /// Reject costs a backup file could use to exhaust memory or CPU
    pub fn check_bounds(&self) -> SymlogResult<()> {
        let within = self.memory_cost <= MAX_MEMORY_COST
            && self.time_cost <= MAX_TIME_COST
            && self.parallelism <= MAX_PARALLELISM;

        if !within {
            return Err(SymlogError::Encryption(format!(
                "Key derivation cost out of bounds: m={}, t={}, p={}",
                self.memory_cost, self.time_cost, self.parallelism
            )));
        }
        Ok(())
    }

    fn hasher(&self) -> SymlogResult<Argon2<'static>> {
        self.check_bounds()?;
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| SymlogError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// A derived AES-256 key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Fresh salt for one backup
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Stretch `passphrase` with `salt` at the given cost
pub fn derive_key(passphrase: &str, salt: &[u8], cost: &KdfCost) -> SymlogResult<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(SymlogError::Encryption(format!(
            "Invalid salt length: expected {}, got {}",
            SALT_LEN,
            salt.len()
        )));
    }

    let mut key = DerivedKey([0u8; KEY_LEN]);
    cost.hasher()?
        .hash_password_into(passphrase.as_bytes(), salt, &mut key.0)
        .map_err(|e| SymlogError::Encryption(format!("Key derivation failed: {}", e)))?;

    Ok(key)
}

#[cfg(test)]
pub(crate) fn test_cost() -> KdfCost {
    KdfCost {
        memory_cost: 8192,
        time_cost: 1,
        parallelism: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic_per_salt() {
        let salt = random_salt();
        let a = derive_key("secret1", &salt, &test_cost()).unwrap();
        let b = derive_key("secret1", &salt, &test_cost()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());

        let other = derive_key("secret2", &salt, &test_cost()).unwrap();
        assert_ne!(a.as_bytes(), other.as_bytes());
    }

    #[test]
    fn test_each_salt_is_fresh() {
        let (s1, s2) = (random_salt(), random_salt());
        assert_ne!(s1, s2);

        let a = derive_key("secret1", &s1, &test_cost()).unwrap();
        let b = derive_key("secret1", &s2, &test_cost()).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_cost_bounds() {
        assert!(KdfCost::default().check_bounds().is_ok());

        let greedy = KdfCost {
            memory_cost: MAX_MEMORY_COST + 1,
            ..test_cost()
        };
        assert!(greedy.check_bounds().is_err());
        assert!(derive_key("secret1", &random_salt(), &greedy).is_err());
    }

    #[test]
    fn test_salt_length_checked() {
        assert!(matches!(
            derive_key("secret1", &[0u8; 4], &test_cost()),
            Err(SymlogError::Encryption(_))
        ));
    }
}
