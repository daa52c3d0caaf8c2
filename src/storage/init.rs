//! Storage initialization
//!
//! Handles first-run setup.

use crate::config::paths::VaultPaths;
use crate::error::VaultError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and an empty document collection. Existing
/// documents are never touched.
pub fn initialize_storage(paths: &VaultPaths) -> Result<(), VaultError> {
    paths.ensure_directories()?;

    if !paths.documents_file().exists() {
        write_json_atomic(
            paths.documents_file(),
            &serde_json::json!({ "documents": [] }),
        )?;
    }

    Ok(())
}
