//! Document display formatting
//!
//! Formats stored documents for terminal output in table and detail views.
//! Nothing here ever prints ciphertext or plaintext.

use crate::models::EncryptedDocument;
use crate::services::IntegrityStatus;

const TITLE_MAX: usize = 40;

/// Format a list of documents as a table
pub fn format_document_list(documents: &[EncryptedDocument]) -> String {
    if documents.is_empty() {
        return "No documents found.".to_string();
    }

    let id_width = documents
        .iter()
        .map(|d| d.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let title_width = documents
        .iter()
        .map(|d| truncate(&d.metadata.title, TITLE_MAX).chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<title_width$}  {:>10}  {:<16}  {}\n",
        "ID",
        "Title",
        "Size",
        "Created",
        "Type",
        id_width = id_width,
        title_width = title_width,
    ));

    output.push_str(&format!(
        "{:-<id_width$}  {:-<title_width$}  {:->10}  {:-<16}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
        title_width = title_width,
    ));

    for document in documents {
        output.push_str(&format!(
            "{:<id_width$}  {:<title_width$}  {:>10}  {:<16}  {}\n",
            document.id,
            truncate(&document.metadata.title, TITLE_MAX),
            format_size(document.metadata.size),
            document.created_at.format("%Y-%m-%d %H:%M"),
            document.metadata.content_type,
            id_width = id_width,
            title_width = title_width,
        ));
    }

    output.push_str(&format!("\n{} document(s)\n", documents.len()));
    output
}

/// Format a single document's details
pub fn format_document_details(document: &EncryptedDocument) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", document.id));
    output.push_str(&format!("{}\n", "=".repeat(10 + document.id.as_str().len())));
    output.push_str(&format!("Title:      {}\n", document.metadata.title));
    output.push_str(&format!("Type:       {}\n", document.metadata.content_type));
    output.push_str(&format!(
        "Size:       {} ({} bytes)\n",
        format_size(document.metadata.size),
        document.metadata.size
    ));
    if let Some(owner) = document.owner() {
        output.push_str(&format!("Owner:      {}\n", owner));
    }
    output.push_str(&format!("SHA-256:    {}\n", document.hash));
    output.push_str(&format!("KDF:        {}\n", document.key_params.kdf.algorithm_name()));
    output.push_str(&format!(
        "Created:    {}\n",
        document.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:    {}\n",
        document.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// One-line description of an integrity check result
pub fn format_integrity_status(id: &str, status: IntegrityStatus) -> String {
    match status {
        IntegrityStatus::Intact => format!("OK: {} is intact", id),
        IntegrityStatus::Mismatch => format!("FAILED: {} does not match the stored document", id),
        IntegrityStatus::Missing => format!("FAILED: no document stored under {}", id),
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KdfParams, KeyDerivationParams, SealedDocument};
    use crate::models::{DocumentId, DocumentMetadata};
    use chrono::{TimeZone, Utc};

    fn document(title: &str, size: u64) -> EncryptedDocument {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let sealed = SealedDocument {
            encrypted_data: "AAAA".into(),
            key_params: KeyDerivationParams::with_salt(b"salt", KdfParams::default()),
        };
        EncryptedDocument::new(
            DocumentId::for_owner("uid42", now).unwrap(),
            sealed,
            "ab".repeat(32),
            DocumentMetadata::new(title, "text/plain", size),
            now,
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_document_list(&[]), "No documents found.");
    }

    #[test]
    fn test_document_list() {
        let output = format_document_list(&[document("lease.txt", 2048)]);
        assert!(output.contains("ID"));
        assert!(output.contains("lease.txt"));
        assert!(output.contains("2.0 KiB"));
        assert!(output.contains("2025-01-15 09:30"));
        assert!(output.contains("1 document(s)"));
        assert!(!output.contains("AAAA"));
    }

    #[test]
    fn test_long_titles_truncated() {
        let title = "x".repeat(60);
        let output = format_document_list(&[document(&title, 1)]);
        assert!(!output.contains(&title));
        assert!(output.contains("..."));
    }

    #[test]
    fn test_document_details() {
        let output = format_document_details(&document("lease.txt", 12));
        assert!(output.contains("Title:      lease.txt"));
        assert!(output.contains("Owner:      uid42"));
        assert!(output.contains("PBKDF2-HMAC-SHA256"));
        assert!(output.contains("12 B (12 bytes)"));
    }

    #[test]
    fn test_integrity_status() {
        assert!(format_integrity_status("a_1", IntegrityStatus::Intact).starts_with("OK"));
        assert!(format_integrity_status("a_1", IntegrityStatus::Mismatch).starts_with("FAILED"));
        assert!(format_integrity_status("a_1", IntegrityStatus::Missing).contains("no document"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.0 MiB");
    }
}
