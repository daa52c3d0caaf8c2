//! Encrypted document model
//!
//! The persisted record for one uploaded document. Field names serialize in
//! camelCase (`encryptedData`, `createdAt`, ...) to match the document
//! collection's existing shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::hashing::is_hex_digest;
use crate::crypto::{KeyDerivationParams, SealedDocument};

use super::ids::DocumentId;

/// Descriptive metadata captured at upload time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Original file name or caller-supplied title
    pub title: String,

    /// MIME type
    #[serde(rename = "type")]
    pub content_type: String,

    /// Size of the original content in bytes
    pub size: u64,
}

impl DocumentMetadata {
    /// Create metadata for a document
    pub fn new(title: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            title: title.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

/// A document encrypted at rest
///
/// `encrypted_data` and `hash` are fixed at creation time; no operation
/// rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedDocument {
    /// Unique identifier (`owner_millis`)
    pub id: DocumentId,

    /// `base64(nonce || ciphertext || tag)`
    pub encrypted_data: String,

    /// SHA-256 of the original plaintext, lowercase hex
    pub hash: String,

    /// Salt and KDF costs needed to re-derive the key
    pub key_params: KeyDerivationParams,

    /// When the document was stored
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,

    /// Title, type and size of the original
    pub metadata: DocumentMetadata,
}

impl EncryptedDocument {
    /// Assemble a record from sealed content
    pub fn new(
        id: DocumentId,
        sealed: SealedDocument,
        hash: String,
        metadata: DocumentMetadata,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            encrypted_data: sealed.encrypted_data,
            hash,
            key_params: sealed.key_params,
            created_at: now,
            updated_at: now,
            metadata,
        }
    }

    /// Owner encoded in the id, if any
    pub fn owner(&self) -> Option<&str> {
        self.id.owner()
    }

    /// Validate the record before it is written
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.metadata.title.trim().is_empty() {
            return Err(DocumentValidationError::EmptyTitle);
        }

        if self.encrypted_data.is_empty() {
            return Err(DocumentValidationError::EmptyCiphertext);
        }

        if !is_hex_digest(&self.hash) {
            return Err(DocumentValidationError::InvalidHash(self.hash.clone()));
        }

        if self.updated_at < self.created_at {
            return Err(DocumentValidationError::TimestampsOutOfOrder);
        }

        Ok(())
    }
}

/// Validation errors for documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    EmptyTitle,
    EmptyCiphertext,
    InvalidHash(String),
    TimestampsOutOfOrder,
}

impl fmt::Display for DocumentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Document title cannot be empty"),
            Self::EmptyCiphertext => write!(f, "Encrypted data cannot be empty"),
            Self::InvalidHash(hash) => write!(f, "Invalid SHA-256 hex digest: '{}'", hash),
            Self::TimestampsOutOfOrder => write!(f, "updatedAt is earlier than createdAt"),
        }
    }
}

impl std::error::Error for DocumentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{hash_document, KdfParams};

    fn sample() -> EncryptedDocument {
        let sealed = SealedDocument {
            encrypted_data: "AAAA".into(),
            key_params: KeyDerivationParams::with_salt(b"0123456789abcdef", KdfParams::default()),
        };
        EncryptedDocument::new(
            DocumentId::new("uid42", 1_000).unwrap(),
            sealed,
            hash_document("hello"),
            DocumentMetadata::new("lease.txt", "text/plain", 5),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_sets_equal_timestamps() {
        let doc = sample();
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.owner(), Some("uid42"));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("encryptedData").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("keyParams").is_some());
        assert_eq!(json["metadata"]["type"], "text/plain");
        assert_eq!(json["metadata"]["size"], 5);
        assert_eq!(json["id"], "uid42_1000");
    }

    #[test]
    fn test_validation() {
        let mut doc = sample();
        doc.metadata.title = "  ".into();
        assert_eq!(doc.validate(), Err(DocumentValidationError::EmptyTitle));

        let mut doc = sample();
        doc.hash = "abc".into();
        assert!(matches!(
            doc.validate(),
            Err(DocumentValidationError::InvalidHash(_))
        ));

        let mut doc = sample();
        doc.encrypted_data.clear();
        assert_eq!(doc.validate(), Err(DocumentValidationError::EmptyCiphertext));
    }
}
