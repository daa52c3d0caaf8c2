//! Secure memory handling for passphrases
//!
//! Provides a string type that zeroes its contents on drop so passphrases do
//! not linger in memory after use.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A passphrase that is wiped when the last copy is dropped
///
/// Neither `Debug` nor `Display` reveal the contents, so it is safe to hold
/// in structs that get logged.
#[derive(Clone)]
pub struct SecureString {
    inner: Zeroizing<String>,
}

impl SecureString {
    /// Create a new SecureString
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Get the string contents
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Get the length
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for SecureString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_is_readable() {
        let passphrase = SecureString::new("correct horse");
        assert_eq!(passphrase.as_str(), "correct horse");
        assert_eq!(passphrase.len(), 13);
        assert!(!passphrase.is_empty());
        assert!(SecureString::from(String::new()).is_empty());
    }

    #[test]
    fn test_passphrase_derefs_to_str() {
        let passphrase: SecureString = "correct horse".into();
        let as_str: &str = &passphrase;
        assert!(as_str.ends_with("horse"));
    }

    #[test]
    fn test_passphrase_never_formatted() {
        let passphrase = SecureString::new("hunter2hunter2");

        let debug = format!("{:?}", passphrase);
        assert_eq!(debug, "SecureString { len: 14 }");

        let display = passphrase.to_string();
        assert_eq!(display, "[REDACTED 14 bytes]");
    }
}
