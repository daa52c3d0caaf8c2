//! Document identifiers
//!
//! A document id is `"{owner}_{unix_millis}"`: the owner identifier plus the
//! upload time. Ids are chosen by the caller and must be unique per store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VaultError, VaultResult};

/// Identifier of a stored document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Build an id from an owner and a millisecond timestamp
    pub fn new(owner: &str, millis: i64) -> VaultResult<Self> {
        validate_owner(owner)?;
        Ok(Self(format!("{}_{}", owner, millis)))
    }

    /// Build an id from an owner and a point in time
    pub fn for_owner(owner: &str, at: DateTime<Utc>) -> VaultResult<Self> {
        Self::new(owner, at.timestamp_millis())
    }

    /// Parse an id supplied on the command line or read from storage
    pub fn parse(s: &str) -> VaultResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VaultError::Validation("Document id cannot be empty".into()));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(VaultError::Validation(format!(
                "Document id contains invalid characters: {}",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Owner prefix, if the id follows the `owner_millis` shape
    pub fn owner(&self) -> Option<&str> {
        let (owner, millis) = self.0.rsplit_once('_')?;
        if owner.is_empty() || millis.parse::<i64>().is_err() {
            return None;
        }
        Some(owner)
    }
}

fn validate_owner(owner: &str) -> VaultResult<()> {
    if owner.is_empty() {
        return Err(VaultError::Validation("Owner cannot be empty".into()));
    }
    if owner.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(VaultError::Validation(format!(
            "Owner contains invalid characters: {}",
            owner
        )));
    }
    Ok(())
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
