//! Document-level encryption
//!
//! [`DocumentCipher`] ties a user's passphrase to a KDF configuration. Each
//! call to [`DocumentCipher::seal`] draws a fresh salt and nonce, so the
//! cipher holds no per-document state and can be shared between threads.

use tracing::debug;

use crate::error::{VaultError, VaultResult};

use super::encryption::{decrypt_string, encrypt_string};
use super::key_derivation::{derive_key, KdfParams, KeyDerivationParams};
use super::secure_memory::SecureString;

/// Ciphertext plus the parameters needed to re-derive its key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedDocument {
    /// `base64(nonce || ciphertext || tag)`
    pub encrypted_data: String,
    /// Salt and KDF costs used for this document
    pub key_params: KeyDerivationParams,
}

/// Encrypts and decrypts documents under one passphrase
#[derive(Debug, Clone)]
pub struct DocumentCipher {
    passphrase: SecureString,
    kdf: KdfParams,
}

impl DocumentCipher {
    /// Create a cipher for a passphrase and KDF configuration
    pub fn new(passphrase: impl Into<SecureString>, kdf: KdfParams) -> VaultResult<Self> {
        let passphrase = passphrase.into();
        if passphrase.is_empty() {
            return Err(VaultError::Validation("Passphrase cannot be empty".into()));
        }
        kdf.validate()?;
        Ok(Self { passphrase, kdf })
    }

    /// KDF configuration used for new documents
    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Encrypt a document under a freshly salted key
    pub fn seal(&self, plaintext: &str) -> VaultResult<SealedDocument> {
        let key_params = KeyDerivationParams::generate(self.kdf);
        let key = derive_key(&self.passphrase, &key_params)?;
        let encrypted_data = encrypt_string(plaintext, &key)?;

        debug!(
            algorithm = self.kdf.algorithm_name(),
            plaintext_len = plaintext.len(),
            "sealed document"
        );

        Ok(SealedDocument {
            encrypted_data,
            key_params,
        })
    }

    /// Decrypt a document sealed with the same passphrase
    ///
    /// The KDF recorded in `key_params` is used, not the cipher's current
    /// configuration, so documents stay readable after a settings change.
    pub fn open(&self, encrypted_data: &str, key_params: &KeyDerivationParams) -> VaultResult<String> {
        let key = derive_key(&self.passphrase, key_params)?;
        decrypt_string(encrypted_data, &key)
    }
}
