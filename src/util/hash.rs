//! Hashing utilities for cache keys.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a JSON document.
///
/// `serde_json` keeps object keys sorted, so equal documents hash equally
/// regardless of the key order they were read in.
pub fn json_digest(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
