//! Content digests for integrity checks
//!
//! The stored hash is taken over the *original* plaintext, so checking it
//! requires the caller to supply the plaintext again.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of a document as lowercase hex
pub fn hash_document(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Check that `content` hashes to `expected` (hex, case-insensitive)
pub fn hash_matches(content: &str, expected: &str) -> bool {
    hash_document(content).eq_ignore_ascii_case(expected.trim())
}

/// Whether `value` looks like a SHA-256 hex digest
pub fn is_hex_digest(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}
