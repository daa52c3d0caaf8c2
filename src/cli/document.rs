//! Document CLI commands
//!
//! Implements CLI commands for uploading, reading and verifying documents.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, Operation};
use crate::config::Settings;
use crate::crypto::{hash_document, DocumentCipher, SecureString};
use crate::display::{format_document_details, format_document_list, format_integrity_status};
use crate::error::{VaultError, VaultResult};
use crate::models::DocumentId;
use crate::services::{check_hash, DocumentService, DocumentUploader, IntegrityStatus, UploadPolicy};
use crate::storage::{DocumentStore, Storage};

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// Encrypt and store a text document
    Upload {
        /// File to upload
        file: PathBuf,
        /// Owner the document is stored under
        #[arg(short, long, env = "DOCVAULT_OWNER")]
        owner: String,
    },

    /// List stored documents
    #[command(alias = "ls")]
    List {
        /// Only show documents for this owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show document metadata (never the content)
    Show {
        /// Document ID
        id: String,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt a document
    Decrypt {
        /// Document ID
        id: String,
        /// Write the plaintext here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a file against a stored document
    Verify {
        /// Document ID
        id: String,
        /// File with the expected content
        file: PathBuf,
        /// Only compare SHA-256 hashes, without decrypting
        #[arg(long)]
        hash_only: bool,
    },

    /// Print the SHA-256 of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },
}

/// Handle a document command
pub fn handle_document_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DocumentCommands,
) -> VaultResult<()> {
    match cmd {
        DocumentCommands::Upload { file, owner } => {
            let cipher = cipher_for(settings)?;
            let service = DocumentService::new(&storage.documents, &cipher).with_audit(&storage.audit);
            let uploader = DocumentUploader::new(service, UploadPolicy::from(&settings.upload));

            let id = uploader.upload_file(&owner, &file)?;
            println!("{}", id);
        }

        DocumentCommands::List { owner } => {
            let documents = match owner {
                Some(owner) => storage.documents.list_by_owner(&owner)?,
                None => storage.documents.list()?,
            };
            print!("{}", format_document_list(&documents));
            if documents.is_empty() {
                println!();
            }
        }

        DocumentCommands::Show { id, json } => {
            let id = DocumentId::parse(&id)?;
            let document = storage
                .documents
                .get(&id)?
                .ok_or_else(|| VaultError::document_not_found(id.as_str()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print!("{}", format_document_details(&document));
            }
        }

        DocumentCommands::Decrypt { id, output } => {
            let id = DocumentId::parse(&id)?;
            let cipher = cipher_for(settings)?;
            let service = DocumentService::new(&storage.documents, &cipher).with_audit(&storage.audit);

            let plaintext = service.retrieve(&id)?;
            match output {
                Some(path) => {
                    fs::write(&path, plaintext.as_bytes()).map_err(|e| {
                        VaultError::Io(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    println!("Decrypted {} to {}", id, path.display());
                }
                None => print!("{}", plaintext),
            }
        }

        DocumentCommands::Verify { id, file, hash_only } => {
            let id = DocumentId::parse(&id)?;
            let content = read_text(&file)?;

            let status = if hash_only {
                let status = check_hash(&storage.documents, &id, &content)?;
                let entry = AuditEntry::new(Operation::Verify, &id, status.outcome()).with_detail("hash");
                if let Err(e) = storage.audit.log(&entry) {
                    warn!(error = %e, "failed to write audit entry");
                }
                status
            } else {
                let cipher = cipher_for(settings)?;
                DocumentService::new(&storage.documents, &cipher)
                    .with_audit(&storage.audit)
                    .verify_round_trip(&id, &content)?
            };

            println!("{}", format_integrity_status(id.as_str(), status));
            if status != IntegrityStatus::Intact {
                return Err(VaultError::Integrity(format!(
                    "Document integrity check failed for {}: {}",
                    id, status
                )));
            }
        }

        DocumentCommands::Hash { file } => {
            let content = read_text(&file)?;
            println!("{}", hash_document(&content));
        }
    }

    Ok(())
}

fn read_text(path: &Path) -> VaultResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    String::from_utf8(bytes)
        .map_err(|_| VaultError::Validation(format!("{} is not valid UTF-8 text", path.display())))
}

fn cipher_for(settings: &Settings) -> VaultResult<DocumentCipher> {
    DocumentCipher::new(resolve_passphrase(settings)?, settings.kdf)
}

/// Passphrase from the configured environment variable, else a hidden prompt
pub fn resolve_passphrase(settings: &Settings) -> VaultResult<SecureString> {
    if let Ok(value) = std::env::var(&settings.passphrase_env) {
        if !value.is_empty() {
            debug!(variable = %settings.passphrase_env, "using passphrase from environment");
            return Ok(SecureString::from(value));
        }
    }

    rpassword::prompt_password("Passphrase: ")
        .map(SecureString::from)
        .map_err(|e| VaultError::Config(format!("Failed to read passphrase: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_rejects_binary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bin.txt");
        fs::write(&path, [0xffu8, 0x00, 0xfe]).unwrap();

        assert!(read_text(&path).unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_passphrase_from_env() {
        let settings = Settings {
            passphrase_env: "DOCVAULT_TEST_PASSPHRASE_RESOLVE".into(),
            ..Settings::default()
        };
        std::env::set_var("DOCVAULT_TEST_PASSPHRASE_RESOLVE", "from the environment");

        let passphrase = resolve_passphrase(&settings).unwrap();
        assert_eq!(passphrase.as_str(), "from the environment");
    }
}
