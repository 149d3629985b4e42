//! Block digests.
//!
//! The preimage is the byte concatenation of
//!
//! 1. `previous_hash` as given,
//! 2. the nonce in base-10 ASCII,
//! 3. the compact JSON encoding of [`BlockData`]:
//!    `{"transactions":[{"amount":..,"sender":..,"recipient":..,"id":..}],"index":n}`.
//!
//! The digest is SHA-256 rendered as 64 lowercase hex characters.

use sha2::{Digest, Sha256};

use super::BlockData;

/// Compute the digest of a block candidate.
pub fn hash_block(previous_hash: &str, nonce: u64, data: &BlockData) -> String {
    let data_json = serde_json::to_string(data).expect("serialize block data");
    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hasher.update(data_json.as_bytes());
    hex::encode(hasher.finalize())
}

/// Difficulty predicate: the digest starts with `difficulty` `'0'` characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}
