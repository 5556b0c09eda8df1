//! Password hashing abstraction; the bcrypt implementation lives in the infra crate.

use std::sync::Arc;

use crate::errors::DomainError;

pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash. A malformed hash is a mismatch.
    fn verify(&self, hash: &str, plain: &str) -> bool;
}

impl<H: PasswordHasher + ?Sized> PasswordHasher for Arc<H> {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        (**self).hash(plain)
    }

    fn verify(&self, hash: &str, plain: &str) -> bool {
        (**self).verify(hash, plain)
    }
}
