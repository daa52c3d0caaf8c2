//! Cryptographic functions for docvault
//!
//! Provides AES-256-GCM encryption with PBKDF2 or Argon2id key derivation,
//! and SHA-256 content digests for integrity checks.

pub mod cipher;
pub mod encryption;
pub mod hashing;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{DocumentCipher, SealedDocument};
pub use encryption::{decrypt, decrypt_string, encrypt, encrypt_string};
pub use hashing::{hash_document, hash_matches};
pub use key_derivation::{derive_key, DerivedKey, KdfParams, KeyDerivationParams};
pub use secure_memory::SecureString;
