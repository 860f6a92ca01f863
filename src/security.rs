use bcrypt::BcryptError;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with a fresh random salt
///
/// CPU-bound; call from `spawn_blocking` inside request handlers.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a password against a stored bcrypt hash
///
/// A stored value that is not a valid bcrypt hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}
