//! Password hashing service (bcrypt)

use crate::auth::errors::AuthError;
use crate::config::DEFAULT_BCRYPT_COST;

/// bcrypt-backed password hasher.
///
/// Digests are in modular-crypt form (`$2b$<cost>$<salt><hash>`), so salt
/// and cost travel with the digest and verification needs nothing else.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Fails only if bcrypt cannot run (invalid cost, no randomness).
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
    }

    /// Check a password against a digest.
    ///
    /// A malformed digest is a mismatch, never an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}
