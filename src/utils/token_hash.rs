use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a raw refresh token.
///
/// The refresh token store only ever sees this digest; a leaked store cannot
/// be replayed as tokens. 64 lowercase hex characters.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
