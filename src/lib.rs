//! docvault - encrypted, integrity-checked document storage
//!
//! This library provides the core functionality for the docvault CLI. Text
//! documents are encrypted with AES-256-GCM under a key derived from the
//! owner's passphrase (PBKDF2-HMAC-SHA256 by default, Argon2id optionally),
//! stored with a SHA-256 digest of the plaintext, and verified after every
//! upload by decrypting what was written.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `crypto`: Key derivation, AES-GCM and hashing
//! - `models`: The stored document record and its id
//! - `storage`: The document store boundary and its implementations
//! - `services`: Document workflow and the upload pipeline
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use docvault::crypto::{DocumentCipher, KdfParams};
//! use docvault::services::DocumentService;
//! use docvault::storage::MemoryDocumentStore;
//!
//! let store = MemoryDocumentStore::new();
//! let cipher = DocumentCipher::new("passphrase", KdfParams::default())?;
//! let service = DocumentService::new(&store, &cipher);
//! let id = service.save_encrypted("uid42", "Hello, Canada!", metadata)?;
//! assert_eq!(service.retrieve(&id)?, "Hello, Canada!");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{VaultError, VaultResult};
