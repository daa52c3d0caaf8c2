//! Upload workflow
//!
//! Reads a file as text, stores it encrypted through [`DocumentService`], then
//! decrypts the persisted record and compares it with what was read. An
//! upload only succeeds once that round trip has been confirmed.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::UploadSettings;
use crate::error::{VaultError, VaultResult};
use crate::models::{DocumentId, DocumentMetadata};
use crate::storage::DocumentStore;

use super::documents::{DocumentService, IntegrityStatus};

/// What the uploader accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted content in bytes
    pub max_bytes: u64,
    /// Accepted extensions, lowercase without the dot
    pub accepted_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadSettings::default())
    }
}

impl From<&UploadSettings> for UploadPolicy {
    fn from(settings: &UploadSettings) -> Self {
        Self {
            max_bytes: settings.max_bytes,
            accepted_extensions: settings
                .accepted_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }
}

impl UploadPolicy {
    fn check_extension(&self, path: &Path) -> VaultResult<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if self.accepted_extensions.iter().any(|e| *e == extension) {
            Ok(())
        } else {
            Err(VaultError::Validation(format!(
                "Unsupported file type '{}' (accepted: {})",
                path.display(),
                self.accepted_extensions.join(", ")
            )))
        }
    }

    fn check_size(&self, size: u64) -> VaultResult<()> {
        if size > self.max_bytes {
            return Err(VaultError::Validation(format!(
                "File is too large ({} bytes, max {})",
                size, self.max_bytes
            )));
        }
        Ok(())
    }
}

/// MIME type for a file, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Runs the upload workflow against a document service
pub struct DocumentUploader<'a, S: DocumentStore + ?Sized> {
    service: DocumentService<'a, S>,
    policy: UploadPolicy,
}

impl<'a, S: DocumentStore + ?Sized> DocumentUploader<'a, S> {
    /// Create an uploader
    pub fn new(service: DocumentService<'a, S>, policy: UploadPolicy) -> Self {
        Self { service, policy }
    }

    /// The underlying document service
    pub fn service(&self) -> &DocumentService<'a, S> {
        &self.service
    }

    /// Upload a text file from disk
    pub fn upload_file(&self, owner: &str, path: &Path) -> VaultResult<DocumentId> {
        self.policy.check_extension(path)?;

        let file_meta = fs::metadata(path)
            .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        if !file_meta.is_file() {
            return Err(VaultError::Validation(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }
        self.policy.check_size(file_meta.len())?;

        let bytes = fs::read(path)
            .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let content = String::from_utf8(bytes).map_err(|_| {
            VaultError::Validation(format!("{} is not valid UTF-8 text", path.display()))
        })?;

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.upload_text(owner, &title, content_type_for(path), &content)
    }

    /// Upload content that is already in memory
    pub fn upload_text(
        &self,
        owner: &str,
        title: &str,
        content_type: &str,
        content: &str,
    ) -> VaultResult<DocumentId> {
        let size = content.len() as u64;
        self.policy.check_size(size)?;

        let metadata = DocumentMetadata::new(title, content_type, size);
        let id = self.service.save_encrypted(owner, content, metadata)?;

        match self.service.verify_round_trip(&id, content)? {
            IntegrityStatus::Intact => {
                info!(document_id = %id, "upload verified");
                Ok(id)
            }
            status => {
                warn!(document_id = %id, %status, "upload failed verification");
                Err(VaultError::Integrity(format!(
                    "Document integrity check failed for {}: {}",
                    id, status
                )))
            }
        }
    }
}
