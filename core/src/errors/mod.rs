//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use gk_shared::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The session store did not answer within its deadline or refused the
    /// connection. Never reported as a session miss.
    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable machine-readable code for API consumers
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Config { .. } => error_codes::CONFIG_ERROR,
            DomainError::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            DomainError::Database { .. } => error_codes::DATABASE_ERROR,
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
        }
    }

    /// Returns the token error if this is one
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }

    /// True when the failure is transient infrastructure rather than a verdict on the caller
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }
}

impl From<gk_shared::ConfigError> for DomainError {
    fn from(err: gk_shared::ConfigError) -> Self {
        DomainError::Config {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
