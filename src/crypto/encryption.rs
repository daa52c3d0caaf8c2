//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for document contents. The output of
//! [`encrypt`] is a single base64 string carrying `nonce || ciphertext || tag`,
//! which is what gets persisted in the document store.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{VaultError, VaultResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

fn cipher_for(key: &DerivedKey) -> VaultResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext data using AES-256-GCM
///
/// Generates a random nonce for each encryption operation, so encrypting the
/// same plaintext twice yields different output.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> VaultResult<String> {
    let cipher = cipher_for(key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("Failed to encrypt document: {}", e)))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(combined))
}

/// Decrypt a string produced by [`encrypt`]
///
/// Fails with [`VaultError::Authentication`] when the tag does not verify;
/// no partially decrypted data is ever returned.
pub fn decrypt(encoded: &str, key: &DerivedKey) -> VaultResult<Vec<u8>> {
    let combined = STANDARD
        .decode(encoded.trim())
        .map_err(|e| VaultError::MalformedCiphertext(format!("Invalid base64 encoding: {}", e)))?;

    if combined.len() < NONCE_SIZE + TAG_SIZE {
        return Err(VaultError::MalformedCiphertext(format!(
            "Expected at least {} bytes, got {}",
            NONCE_SIZE + TAG_SIZE,
            combined.len()
        )));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = cipher_for(key)?;
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::Authentication)
}

/// Encrypt a string
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> VaultResult<String> {
    encrypt(plaintext.as_bytes(), key)
}

/// Decrypt to a string
pub fn decrypt_string(encoded: &str, key: &DerivedKey) -> VaultResult<String> {
    let plaintext = decrypt(encoded, key)?;
    String::from_utf8(plaintext)
        .map_err(|e| VaultError::Encryption(format!("Invalid UTF-8 in decrypted data: {}", e)))
}
