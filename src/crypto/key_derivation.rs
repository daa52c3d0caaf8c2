//! Passphrase-based key derivation
//!
//! Derives 256-bit AES keys from user passphrases. PBKDF2-HMAC-SHA256 is the
//! default; Argon2id is available for installations that want a memory-hard
//! function. Every document gets its own random salt, stored next to the
//! ciphertext, so no two documents share a key.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// Length of a derived key in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Length of a freshly generated salt in bytes
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Key derivation function and its cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum KdfParams {
    /// PBKDF2 with HMAC-SHA256
    #[serde(rename = "pbkdf2-sha256")]
    Pbkdf2Sha256 {
        /// Iteration count (default: 100,000)
        iterations: u32,
    },
    /// Argon2id (RFC 9106)
    #[serde(rename = "argon2id")]
    Argon2id {
        /// Memory cost in KiB (default: 65536 = 64 MiB)
        memory_cost: u32,
        /// Time cost (iterations, default: 3)
        time_cost: u32,
        /// Parallelism degree (default: 4)
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Argon2id with the default costs
    pub fn argon2id() -> Self {
        Self::Argon2id {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }

    /// Human-readable algorithm name
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 { .. } => "PBKDF2-HMAC-SHA256",
            Self::Argon2id { .. } => "Argon2id",
        }
    }

    /// Reject cost parameters the primitives cannot run with
    pub fn validate(&self) -> VaultResult<()> {
        match *self {
            Self::Pbkdf2Sha256 { iterations } => {
                if iterations == 0 {
                    return Err(VaultError::Validation(
                        "PBKDF2 iterations must be greater than zero".into(),
                    ));
                }
            }
            Self::Argon2id {
                memory_cost,
                time_cost,
                parallelism,
            } => {
                Params::new(memory_cost, time_cost, parallelism, Some(KEY_SIZE)).map_err(|e| {
                    VaultError::Validation(format!("Invalid Argon2 parameters: {}", e))
                })?;
            }
        }
        Ok(())
    }
}

/// Parameters needed to re-derive a document key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Salt for key derivation (base64 encoded)
    pub salt: String,
    /// Function and costs used
    pub kdf: KdfParams,
}

impl KeyDerivationParams {
    /// Create params with a fresh random salt
    pub fn generate(kdf: KdfParams) -> Self {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(&salt, kdf)
    }

    /// Create params with a specific salt
    pub fn with_salt(salt: &[u8], kdf: KdfParams) -> Self {
        Self {
            salt: STANDARD.encode(salt),
            kdf,
        }
    }

    fn decode_salt(&self) -> VaultResult<Vec<u8>> {
        let salt = STANDARD
            .decode(&self.salt)
            .map_err(|e| VaultError::Encryption(format!("Invalid salt encoding: {}", e)))?;
        if salt.is_empty() {
            return Err(VaultError::Encryption("Salt must not be empty".into()));
        }
        Ok(salt)
    }
}

/// A derived encryption key, wiped from memory when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a passphrase
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> VaultResult<DerivedKey> {
    if passphrase.is_empty() {
        return Err(VaultError::Validation("Passphrase cannot be empty".into()));
    }

    let salt = params.decode_salt()?;
    let mut key = DerivedKey {
        key: [0u8; KEY_SIZE],
    };

    match params.kdf {
        KdfParams::Pbkdf2Sha256 { iterations } => {
            if iterations == 0 {
                return Err(VaultError::Encryption(
                    "PBKDF2 iterations must be greater than zero".into(),
                ));
            }
            pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &salt, iterations, &mut key.key);
        }
        KdfParams::Argon2id {
            memory_cost,
            time_cost,
            parallelism,
        } => {
            let argon2_params = Params::new(memory_cost, time_cost, parallelism, Some(KEY_SIZE))
                .map_err(|e| VaultError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

            Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params)
                .hash_password_into(passphrase.as_bytes(), &salt, &mut key.key)
                .map_err(|e| VaultError::Encryption(format!("Key derivation failed: {}", e)))?;
        }
    }

    Ok(key)
}
