//! Custom error types for docvault
//!
//! This module defines the error hierarchy for the vault using thiserror
//! for ergonomic error definitions.
//!
//! An integrity *mismatch* is deliberately not an error: integrity checks
//! report it as a value so callers can pick their own policy.

use thiserror::Error;

/// The main error type for docvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The underlying crypto primitive could not run
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The encoded blob is not a nonce-prefixed ciphertext
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// The authentication tag did not verify
    #[error("Decryption failed: invalid passphrase or corrupted data")]
    Authentication,

    /// A stored document failed its post-write verification
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VaultError {
    /// Create a "not found" error for documents
    pub fn document_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Document",
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

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for docvault operations
pub type VaultResult<T> = Result<T, VaultError>;
