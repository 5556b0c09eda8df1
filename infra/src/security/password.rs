//! bcrypt password hashing

use gk_core::errors::DomainError;
use gk_core::services::PasswordHasher;

use crate::InfrastructureError;

/// `PasswordHasher` backed by bcrypt
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Lower costs are for tests only
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| InfrastructureError::Hashing(e.to_string()).into())
    }

    fn verify(&self, hash: &str, plain: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}
