//! Audit log display formatting

use crate::audit::AuditEntry;

/// Format audit entries, oldest first
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Operation, Outcome};
    use crate::models::DocumentId;

    #[test]
    fn test_format_audit_entries() {
        assert_eq!(format_audit_entries(&[]), "No audit entries found.");

        let id = DocumentId::new("uid42", 1_700_000_000_000).unwrap();
        let entries = vec![
            AuditEntry::new(Operation::Upload, &id, Outcome::Success),
            AuditEntry::new(Operation::Verify, &id, Outcome::Mismatch),
        ];
        let output = format_audit_entries(&entries);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("uid42_1700000000000"));
    }
}
