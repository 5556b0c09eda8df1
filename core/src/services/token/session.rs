//! Session store key layout and token hashing.

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// Value written under a tombstone key
pub const TOMBSTONE_VALUE: &str = "1";

/// `refresh:<jti>`: live session holding the token hash
pub fn session_key(jti: &str) -> String {
    format!("refresh:{}", jti)
}

/// `refresh:used:<jti>`: marks a retired session id
pub fn tombstone_key(jti: &str) -> String {
    format!("refresh:used:{}", jti)
}

/// Hex SHA-256 of the token string; the store never sees the raw token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub fn hashes_match(stored: &str, presented: &str) -> bool {
    constant_time_eq(stored.as_bytes(), presented.as_bytes())
}
