//! Document service
//!
//! Provides the encrypted document workflow on top of any [`DocumentStore`]:
//! storing sealed content with its hash, reading it back, and checking
//! integrity.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, Operation, Outcome};
use crate::crypto::{hash_document, hash_matches, DocumentCipher};
use crate::error::{VaultError, VaultResult};
use crate::models::{DocumentId, DocumentMetadata, EncryptedDocument};
use crate::storage::DocumentStore;

/// How many successive milliseconds are tried before giving up on an id
const MAX_ID_PROBES: i64 = 1000;

/// Result of an integrity check
///
/// `Missing` and `Mismatch` are kept apart so a missing record is never
/// reported as tampering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    /// The document exists and matches the supplied content
    Intact,
    /// The document exists but does not match
    Mismatch,
    /// No document is stored under the id
    Missing,
}

impl IntegrityStatus {
    /// Whether the document was confirmed intact
    pub fn is_intact(&self) -> bool {
        matches!(self, Self::Intact)
    }

    /// Audit outcome recorded for this status
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Intact => Outcome::Success,
            Self::Mismatch => Outcome::Mismatch,
            Self::Missing => Outcome::Missing,
        }
    }
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intact => write!(f, "intact"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Compare a stored document's hash with the hash of `content`
///
/// Needs no key, so it can run without the owner's passphrase.
pub fn check_hash<S: DocumentStore + ?Sized>(
    store: &S,
    id: &DocumentId,
    content: &str,
) -> VaultResult<IntegrityStatus> {
    Ok(match store.get(id)? {
        None => IntegrityStatus::Missing,
        Some(document) if hash_matches(content, &document.hash) => IntegrityStatus::Intact,
        Some(_) => IntegrityStatus::Mismatch,
    })
}

/// Service for encrypted document storage
pub struct DocumentService<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    cipher: &'a DocumentCipher,
    audit: Option<&'a AuditLogger>,
}

impl<'a, S: DocumentStore + ?Sized> DocumentService<'a, S> {
    /// Create a new document service
    pub fn new(store: &'a S, cipher: &'a DocumentCipher) -> Self {
        Self {
            store,
            cipher,
            audit: None,
        }
    }

    /// Record operations in an audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Audit writes never fail the operation being audited
    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, document_id = %entry.document_id, "failed to write audit entry");
            }
        }
    }

    /// Encrypt and store a document, returning its new id
    pub fn save_encrypted(
        &self,
        owner: &str,
        content: &str,
        metadata: DocumentMetadata,
    ) -> VaultResult<DocumentId> {
        self.save_encrypted_at(owner, content, metadata, Utc::now())
    }

    /// Encrypt and store a document as of `now`
    ///
    /// The stored hash is computed over `content`, not over the ciphertext.
    pub fn save_encrypted_at(
        &self,
        owner: &str,
        content: &str,
        metadata: DocumentMetadata,
        now: DateTime<Utc>,
    ) -> VaultResult<DocumentId> {
        let start = now.timestamp_millis();
        let first_id = DocumentId::new(owner, start)?;

        let sealed = self.cipher.seal(content)?;
        let hash = hash_document(content);
        let mut document = EncryptedDocument::new(first_id, sealed, hash, metadata, now);

        document
            .validate()
            .map_err(|e| VaultError::Validation(e.to_string()))?;

        self.insert_with_free_id(&mut document, owner, start)?;
        let id = document.id.clone();

        info!(
            document_id = %id,
            size = document.metadata.size,
            content_type = %document.metadata.content_type,
            "stored encrypted document"
        );
        self.record(
            AuditEntry::new(Operation::Upload, &id, Outcome::Success)
                .with_detail(format!("{} bytes", document.metadata.size)),
        );

        Ok(id)
    }

    /// Store `document` under the first free `owner_millis` id at or after `start`
    ///
    /// Each attempt is an atomic insert-if-absent, so concurrent saves for the
    /// same owner never share an id.
    fn insert_with_free_id(
        &self,
        document: &mut EncryptedDocument,
        owner: &str,
        start: i64,
    ) -> VaultResult<()> {
        for offset in 0..MAX_ID_PROBES {
            document.id = DocumentId::new(owner, start + offset)?;
            match self.store.put_new(document) {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    debug!(document_id = %document.id, "document id taken, trying next millisecond");
                }
                Err(e) => {
                    warn!(document_id = %document.id, error = %e, "failed to store document");
                    self.record(
                        AuditEntry::new(Operation::Upload, &document.id, Outcome::Failure)
                            .with_detail(e.to_string()),
                    );
                    return Err(e);
                }
            }
        }

        Err(VaultError::Duplicate {
            entity_type: "Document",
            identifier: format!("{}_{}", owner, start),
        })
    }

    /// Get a stored record without decrypting it
    pub fn get(&self, id: &DocumentId) -> VaultResult<Option<EncryptedDocument>> {
        self.store.get(id)
    }

    /// Read a document back and decrypt it
    ///
    /// A missing record is `NotFound`; a record whose tag does not verify is
    /// `Authentication`. No plaintext is returned in either case.
    pub fn retrieve(&self, id: &DocumentId) -> VaultResult<String> {
        let document = match self.store.get(id)? {
            Some(document) => document,
            None => {
                self.record(AuditEntry::new(Operation::Retrieve, id, Outcome::Missing));
                return Err(VaultError::document_not_found(id.as_str()));
            }
        };

        match self.cipher.open(&document.encrypted_data, &document.key_params) {
            Ok(plaintext) => {
                debug!(document_id = %id, "decrypted document");
                self.record(AuditEntry::new(Operation::Retrieve, id, Outcome::Success));
                Ok(plaintext)
            }
            Err(e) => {
                warn!(document_id = %id, error = %e, "failed to decrypt document");
                self.record(
                    AuditEntry::new(Operation::Retrieve, id, Outcome::Failure)
                        .with_detail(e.to_string()),
                );
                Err(e)
            }
        }
    }

    /// Compare the stored hash with the hash of `content`
    ///
    /// This only proves that `content` is what was hashed at upload time; it
    /// does not touch the ciphertext. See [`Self::verify_round_trip`].
    pub fn check_integrity(&self, id: &DocumentId, content: &str) -> VaultResult<IntegrityStatus> {
        let status = check_hash(self.store, id, content)?;

        debug!(document_id = %id, %status, "hash integrity check");
        self.record(
            AuditEntry::new(Operation::Verify, id, status.outcome()).with_detail("hash"),
        );
        Ok(status)
    }

    /// `true` only when the document exists and its hash matches `content`
    ///
    /// Lookup failures are reported as `false`; use [`Self::check_integrity`]
    /// to tell a missing document from a modified one.
    pub fn verify_integrity(&self, id: &DocumentId, content: &str) -> bool {
        match self.check_integrity(id, content) {
            Ok(status) => status.is_intact(),
            Err(e) => {
                warn!(document_id = %id, error = %e, "integrity check failed");
                false
            }
        }
    }

    /// Decrypt the persisted record and compare it with `content`
    ///
    /// Confirms the stored ciphertext round-trips to the expected plaintext
    /// and that the stored hash agrees. An authentication failure on the
    /// stored blob counts as `Mismatch`.
    pub fn verify_round_trip(&self, id: &DocumentId, content: &str) -> VaultResult<IntegrityStatus> {
        let status = match self.store.get(id)? {
            None => IntegrityStatus::Missing,
            Some(document) => {
                let opened = self.cipher.open(&document.encrypted_data, &document.key_params);
                match opened {
                    Ok(plaintext) if plaintext == content && hash_matches(&plaintext, &document.hash) => {
                        IntegrityStatus::Intact
                    }
                    Ok(_) => IntegrityStatus::Mismatch,
                    Err(e @ (VaultError::Authentication | VaultError::MalformedCiphertext(_))) => {
                        warn!(document_id = %id, error = %e, "stored ciphertext did not decrypt");
                        IntegrityStatus::Mismatch
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        debug!(document_id = %id, %status, "round-trip integrity check");
        self.record(
            AuditEntry::new(Operation::Verify, id, status.outcome()).with_detail("round-trip"),
        );
        Ok(status)
    }
}
