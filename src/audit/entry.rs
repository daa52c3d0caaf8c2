//! Audit entry data structures
//!
//! Defines the operations recorded against documents and the entry format
//! itself. Entries carry ids and outcomes only, never document contents or
//! passphrases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::DocumentId;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Document was encrypted and stored
    Upload,
    /// Document was read back and decrypted
    Retrieve,
    /// Document integrity was checked
    Verify,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Upload => write!(f, "UPLOAD"),
            Operation::Retrieve => write!(f, "RETRIEVE"),
            Operation::Verify => write!(f, "VERIFY"),
        }
    }
}

/// Result of an audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Mismatch,
    Missing,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
            Outcome::Mismatch => write!(f, "mismatch"),
            Outcome::Missing => write!(f, "missing"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Document the operation touched
    pub document_id: String,

    /// Owner recorded in the document id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// How the operation ended
    pub outcome: Outcome,

    /// Short free-form detail (error message, title)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry stamped with the current time
    pub fn new(operation: Operation, document_id: &DocumentId, outcome: Outcome) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            document_id: document_id.to_string(),
            owner: document_id.owner().map(str::to_string),
            outcome,
            detail: None,
        }
    }

    /// Attach a detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.document_id,
            self.outcome
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}
