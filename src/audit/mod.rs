//! Audit logging for docvault
//!
//! Records every upload, retrieval and integrity check in an append-only
//! audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one operation on one document, with its outcome.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use docvault::audit::{AuditEntry, AuditLogger, Operation, Outcome};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::new(Operation::Upload, &doc_id, Outcome::Success))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::AuditLogger;
