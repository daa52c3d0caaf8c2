//! Service layer for docvault
//!
//! The service layer provides the document workflow on top of the storage
//! layer: sealing, hashing, retrieval and the post-upload round-trip check.

pub mod documents;
pub mod upload;

pub use documents::{check_hash, DocumentService, IntegrityStatus};
pub use upload::{content_type_for, DocumentUploader, UploadPolicy};
