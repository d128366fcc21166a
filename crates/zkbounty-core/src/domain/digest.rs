//! Canonical JSON serialization and SHA-256 digests.
//!
//! Commitments and attestations must be reproducible from their inputs
//! regardless of how the input record was assembled, so object keys are
//! sorted recursively before hashing. Array order is preserved. All keys in
//! this crate's input records are ASCII, so plain byte ordering is stable.

use sha2::{Digest, Sha256};

/// Recursively sort object keys so serialization is insertion-order
/// independent.
fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut sorted = serde_json::Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_keys(v));
                }
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

/// Serialize a JSON value to its canonical compact form (sorted keys).
pub fn canonical_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&sort_keys(value))
}

/// SHA-256 of raw bytes, rendered as 64 lowercase hex characters.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 hex digest of a value's canonical JSON form.
pub fn digest_value(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(value)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_key_order_invariant() {
        let a = json!({ "b": 1, "a": 2, "c": { "z": 3, "y": 4 } });
        let b = json!({ "c": { "y": 4, "z": 3 }, "a": 2, "b": 1 });
        assert_eq!(
            canonical_json(&a).expect("canonical a"),
            canonical_json(&b).expect("canonical b"),
        );
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value = json!({ "commitment": "ab", "nonce": "x", "timestamp": 1 });
        let canonical = canonical_json(&value).expect("canonical");
        assert_eq!(canonical, r#"{"commitment":"ab","nonce":"x","timestamp":1}"#);
    }

    #[test]
    fn test_canonical_json_preserves_array_order() {
        let a = json!({ "items": [3, 1, 2] });
        let b = json!({ "items": [1, 2, 3] });
        assert_ne!(
            canonical_json(&a).expect("canonical a"),
            canonical_json(&b).expect("canonical b"),
        );
    }

    #[test]
    fn test_sha256_hex_shape() {
        let digest = sha256_hex(b"zkbounty");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_digest_value_deterministic() {
        let value = json!({ "evaluator": "addr", "timestamp": 1700000000000i64 });
        let first = digest_value(&value).expect("digest");
        let second = digest_value(&value).expect("digest");
        assert_eq!(first, second);
    }

    #[test]
    fn test_digest_value_single_field_delta() {
        let a = json!({ "evaluator": "addr-a", "timestamp": 1 });
        let b = json!({ "evaluator": "addr-b", "timestamp": 1 });
        assert_ne!(
            digest_value(&a).expect("digest a"),
            digest_value(&b).expect("digest b"),
        );
    }
}
