//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's ports:
//! - **Cache**: Redis client and the Redis-backed session store, plus an
//!   in-memory session store for development and tests
//! - **Database**: MySQL user repository using SQLx, plus an in-memory directory
//! - **Security**: bcrypt password hashing

use gk_core::errors::DomainError;

/// Cache module - Redis client and session stores
pub mod cache;

/// Database module - user directory implementations
pub mod database;

/// Security module - password hashing
pub mod security;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Operation did not finish within its deadline
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout { operation: String, after_ms: u128 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(_) | InfrastructureError::Timeout { .. } => {
                DomainError::StoreUnavailable {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Database(_) => DomainError::Database {
                message: err.to_string(),
            },
            InfrastructureError::Config(message) => DomainError::Config { message },
            InfrastructureError::Hashing(message) => DomainError::Internal { message },
        }
    }
}
