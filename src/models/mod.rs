//! Core data models for docvault

pub mod document;
pub mod ids;

pub use document::{DocumentMetadata, DocumentValidationError, EncryptedDocument};
pub use ids::DocumentId;
