//! The document store boundary
//!
//! Anything that can put and get records by id can back the vault: the JSON
//! file repository, the in-memory store, or a remote document database.

use crate::error::VaultResult;
use crate::models::{DocumentId, EncryptedDocument};

/// Key-value persistence for encrypted documents
///
/// `put` is keyed by `document.id`; writing an existing id replaces the
/// record (last write wins). Callers are responsible for choosing unique ids.
pub trait DocumentStore: Send + Sync {
    /// Persist a document under its id
    fn put(&self, document: &EncryptedDocument) -> VaultResult<()>;

    /// Persist a document only if its id is unused
    ///
    /// The check and the write happen atomically. Returns `false`, leaving the
    /// store untouched, when a record already exists under the id.
    fn put_new(&self, document: &EncryptedDocument) -> VaultResult<bool>;

    /// Fetch a document, or `None` when the id is unknown
    fn get(&self, id: &DocumentId) -> VaultResult<Option<EncryptedDocument>>;

    /// Whether a record exists for `id`
    fn contains(&self, id: &DocumentId) -> VaultResult<bool> {
        Ok(self.get(id)?.is_some())
    }
}
