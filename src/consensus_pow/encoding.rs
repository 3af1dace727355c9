use crate::block::Block;
use sha2::{Digest, Sha256};

/// Canonical byte encoding of a block: compact JSON with keys sorted at every
/// depth. Every node hashing the same field values gets the same bytes.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    // serde_json::Value objects are BTreeMap-backed, which sorts keys.
    let value = serde_json::to_value(block).unwrap_or(serde_json::Value::Null);
    value.to_string().into_bytes()
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn hash_block(block: &Block) -> String {
    sha256_hex(&canonical_bytes(block))
}
