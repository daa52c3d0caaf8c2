//! Display formatting for terminal output
//!
//! Provides utilities for formatting documents and audit entries for
//! terminal display.

pub mod audit;
pub mod document;

pub use audit::format_audit_entries;
pub use document::{
    format_document_details, format_document_list, format_integrity_status, format_size,
};
