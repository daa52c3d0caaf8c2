//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::VaultError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, VaultError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| VaultError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| VaultError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), VaultError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VaultError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    if let Err(e) = write_synced(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        VaultError::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            e
        ))
    })
}

/// Serialize into `path` and fsync before returning
fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), VaultError> {
    let storage_err = |what: &str, e: &dyn std::fmt::Display| {
        VaultError::Storage(format!("{} {}: {}", what, path.display(), e))
    };

    let file = File::create(path).map_err(|e| storage_err("Failed to create", &e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("Failed to serialize into", &e))?;
    writer
        .flush()
        .map_err(|e| storage_err("Failed to flush", &e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("Failed to sync", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Collection {
        documents: Vec<String>,
    }

    fn collection() -> Collection {
        Collection {
            documents: vec!["uid42_1700000000000".into(), "uid42_1700000000001".into()],
        }
    }

    #[test]
    fn test_missing_collection_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();

        let data: Collection = read_json(temp_dir.path().join("documents.json")).unwrap();
        assert!(data.documents.is_empty());
    }

    #[test]
    fn test_written_collection_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("documents.json");

        write_json_atomic(&path, &collection()).unwrap();

        let loaded: Collection = read_json(&path).unwrap();
        assert_eq!(loaded, collection());
        assert!(!temp_dir.path().join("data").join("documents.json.tmp").exists());
    }

    #[test]
    fn test_rewrite_replaces_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");

        write_json_atomic(&path, &collection()).unwrap();
        write_json_atomic(&path, &Collection::default()).unwrap();

        let loaded: Collection = read_json(&path).unwrap();
        assert!(loaded.documents.is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");
        fs::write(&path, "{\"documents\": [").unwrap();

        let result: Result<Collection, _> = read_json(&path);
        assert!(matches!(result, Err(VaultError::Storage(_))));
    }
}
