//! In-memory document store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{VaultError, VaultResult};
use crate::models::{DocumentId, EncryptedDocument};

use super::store::DocumentStore;

/// A process-local store, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    data: RwLock<HashMap<DocumentId, EncryptedDocument>>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> VaultResult<usize> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> VaultResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn put(&self, document: &EncryptedDocument) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(document.id.clone(), document.clone());
        Ok(())
    }

    fn put_new(&self, document: &EncryptedDocument) -> VaultResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        if data.contains_key(&document.id) {
            return Ok(false);
        }
        data.insert(document.id.clone(), document.clone());
        Ok(true)
    }

    fn get(&self, id: &DocumentId) -> VaultResult<Option<EncryptedDocument>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(id).cloned())
    }
}
