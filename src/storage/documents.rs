//! Document repository for JSON storage
//!
//! Manages loading and saving encrypted documents to documents.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::models::{DocumentId, EncryptedDocument};

use super::file_io::{read_json, write_json_atomic};
use super::store::DocumentStore;

/// Serializable document data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DocumentData {
    documents: Vec<EncryptedDocument>,
}

/// Repository for encrypted document persistence
pub struct DocumentRepository {
    path: PathBuf,
    data: RwLock<HashMap<DocumentId, EncryptedDocument>>,
}

impl DocumentRepository {
    /// Create a new document repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load documents from disk
    pub fn load(&self) -> VaultResult<()> {
        let file_data: DocumentData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for document in file_data.documents {
            data.insert(document.id.clone(), document);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded documents");
        Ok(())
    }

    /// Save documents to disk
    pub fn save(&self) -> VaultResult<()> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.write_snapshot(&data)
    }

    fn write_snapshot(&self, data: &HashMap<DocumentId, EncryptedDocument>) -> VaultResult<()> {
        let mut documents: Vec<_> = data.values().cloned().collect();
        documents.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let file_data = DocumentData { documents };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get all documents, oldest first
    pub fn list(&self) -> VaultResult<Vec<EncryptedDocument>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut documents: Vec<_> = data.values().cloned().collect();
        documents.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(documents)
    }

    /// Get documents belonging to one owner, oldest first
    pub fn list_by_owner(&self, owner: &str) -> VaultResult<Vec<EncryptedDocument>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| d.owner() == Some(owner))
            .collect())
    }

    /// Count documents
    pub fn count(&self) -> VaultResult<usize> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

impl DocumentStore for DocumentRepository {
    /// Insert or replace a document and persist immediately
    fn put(&self, document: &EncryptedDocument) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let previous = data.insert(document.id.clone(), document.clone());

        // Hold the write lock across the write so snapshots never interleave
        if let Err(e) = self.write_snapshot(&data) {
            match previous {
                Some(old) => data.insert(document.id.clone(), old),
                None => data.remove(&document.id),
            };
            return Err(e);
        }

        Ok(())
    }

    /// Insert a document under an unused id and persist immediately
    fn put_new(&self, document: &EncryptedDocument) -> VaultResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&document.id) {
            return Ok(false);
        }
        data.insert(document.id.clone(), document.clone());

        if let Err(e) = self.write_snapshot(&data) {
            data.remove(&document.id);
            return Err(e);
        }

        Ok(true)
    }

    fn get(&self, id: &DocumentId) -> VaultResult<Option<EncryptedDocument>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{hash_document, KdfParams, KeyDerivationParams, SealedDocument};
    use crate::models::DocumentMetadata;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, DocumentRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");
        let repo = DocumentRepository::new(path);
        (temp_dir, repo)
    }

    fn doc(owner: &str, millis: i64) -> EncryptedDocument {
        let at = Utc.timestamp_millis_opt(millis).unwrap();
        EncryptedDocument::new(
            DocumentId::for_owner(owner, at).unwrap(),
            SealedDocument {
                encrypted_data: "AAAA".into(),
                key_params: KeyDerivationParams::with_salt(b"salt-salt", KdfParams::default()),
            },
            hash_document("content"),
            DocumentMetadata::new("passport.pdf", "application/pdf", 7),
            at,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_put_persists_immediately() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let d = doc("uid42", 1_000);
        repo.put(&d).unwrap();
        assert!(repo.path().exists());

        // A fresh repository over the same file sees the document
        let reopened = DocumentRepository::new(repo.path().clone());
        reopened.load().unwrap();
        assert_eq!(reopened.get(&d.id).unwrap(), Some(d));
    }

    #[test]
    fn test_get_missing() {
        let (_temp_dir, repo) = create_test_repo();
        let id = DocumentId::parse("nobody_1").unwrap();
        assert_eq!(repo.get(&id).unwrap(), None);
        assert!(!repo.contains(&id).unwrap());
    }

    #[test]
    fn test_list_sorted_and_by_owner() {
        let (_temp_dir, repo) = create_test_repo();
        let base = 1_700_000_000_000;

        repo.put(&doc("bob", base + 2)).unwrap();
        repo.put(&doc("alice", base)).unwrap();
        repo.put(&doc("alice", base + 1)).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let alice = repo.list_by_owner("alice").unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|d| d.owner() == Some("alice")));
    }

    #[test]
    fn test_put_replaces_existing() {
        let (_temp_dir, repo) = create_test_repo();
        let mut d = doc("uid42", 5_000);
        repo.put(&d).unwrap();

        d.updated_at = d.updated_at + Duration::seconds(1);
        repo.put(&d).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(&d.id).unwrap().unwrap().updated_at, d.updated_at);
    }

    #[test]
    fn test_put_new_refuses_taken_id() {
        let (_temp_dir, repo) = create_test_repo();
        let first = doc("uid42", 7_000);
        assert!(repo.put_new(&first).unwrap());

        let mut second = doc("uid42", 7_000);
        second.hash = hash_document("other content");
        assert!(!repo.put_new(&second).unwrap());

        let reopened = DocumentRepository::new(repo.path().clone());
        reopened.load().unwrap();
        assert_eq!(reopened.get(&first.id).unwrap(), Some(first));
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
