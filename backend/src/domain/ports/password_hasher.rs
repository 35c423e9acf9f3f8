//! Port for one-way password hashing.
//!
//! Hashing is CPU-bound and synchronous, so the trait is not async. The domain
//! only ever sees [`PasswordHash`] strings; the encoding is the adapter's
//! business.

use crate::domain::{PasswordHash, PlainPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a new hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Derive and check password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a new password with a fresh salt.
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check a candidate password against a stored hash.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in hasher for tests; never use it for real accounts.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
impl FixturePasswordHasher {
    const PREFIX: &'static str = "fixture$";
}

#[cfg(any(test, feature = "test-support"))]
impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{}{}", Self::PREFIX, password.expose())))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        hash.as_ref()
            .strip_prefix(Self::PREFIX)
            .map(|stored| stored == candidate)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_hasher_verifies_its_own_hashes() {
        let hasher = FixturePasswordHasher;
        let password = PlainPassword::new("correct horse").expect("valid password");
        let hash = hasher.hash(&password).expect("hash");
        assert_eq!(hasher.verify("correct horse", &hash), Ok(true));
        assert_eq!(hasher.verify("wrong horse", &hash), Ok(false));
    }

    #[test]
    fn fixture_hasher_rejects_foreign_hashes() {
        let hasher = FixturePasswordHasher;
        let result = hasher.verify("anything", &PasswordHash::new("$argon2id$..."));
        assert!(matches!(result, Err(PasswordHashError::MalformedHash { .. })));
    }
}
