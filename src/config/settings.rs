//! User settings for docvault
//!
//! Manages key derivation costs, upload limits and where the passphrase is
//! read from.

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::crypto::KdfParams;
use crate::error::VaultError;

/// Limits applied to uploaded files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Largest accepted file in bytes (default: 10 MiB)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted file extensions, lowercase without the dot
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_accepted_extensions() -> Vec<String> {
    ["pdf", "doc", "docx", "txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

/// User settings for docvault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key derivation used for newly stored documents
    #[serde(default)]
    pub kdf: KdfParams,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadSettings,

    /// Environment variable consulted for the passphrase before prompting
    #[serde(default = "default_passphrase_env")]
    pub passphrase_env: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_passphrase_env() -> String {
    "DOCVAULT_PASSPHRASE".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            kdf: KdfParams::default(),
            upload: UploadSettings::default(),
            passphrase_env: default_passphrase_env(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to save
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| VaultError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the settings can actually be used
    pub fn validate(&self) -> Result<(), VaultError> {
        self.kdf
            .validate()
            .map_err(|e| VaultError::Config(e.to_string()))?;

        if self.upload.max_bytes == 0 {
            return Err(VaultError::Config(
                "upload.max_bytes must be greater than zero".into(),
            ));
        }

        if self.upload.accepted_extensions.is_empty() {
            return Err(VaultError::Config(
                "upload.accepted_extensions must list at least one extension".into(),
            ));
        }

        if self.passphrase_env.trim().is_empty() {
            return Err(VaultError::Config("passphrase_env cannot be empty".into()));
        }

        Ok(())
    }
}
