//! Storage layer for docvault
//!
//! Provides the [`DocumentStore`] boundary plus two implementations: a JSON
//! file repository with atomic writes and an in-memory store.

pub mod documents;
pub mod file_io;
pub mod init;
pub mod memory;
pub mod store;

pub use documents::DocumentRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use memory::MemoryDocumentStore;
pub use store::DocumentStore;

use crate::audit::AuditLogger;
use crate::config::paths::VaultPaths;
use crate::error::VaultError;

/// Main storage coordinator that provides access to the document repository
/// and the audit log
pub struct Storage {
    paths: VaultPaths,
    pub documents: DocumentRepository,
    pub audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: VaultPaths) -> Result<Self, VaultError> {
        paths.ensure_directories()?;

        Ok(Self {
            documents: DocumentRepository::new(paths.documents_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), VaultError> {
        self.documents.load()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());

        storage.load_all().unwrap();
        assert_eq!(storage.documents.count().unwrap(), 0);
        assert!(!storage.audit.exists());
    }
}
