//! Authentication and token error types

use gk_shared::error_codes;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Missing authentication token")]
    MissingToken,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::InsufficientPermissions => error_codes::FORBIDDEN,
            AuthError::MissingToken => error_codes::MISSING_TOKEN,
        }
    }
}

/// Token lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a well-formed token of the expected kind and issuer
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    /// Refresh token without a `jti` claim
    #[error("Refresh token has no session id")]
    MissingSessionId,

    #[error("Session expired or revoked")]
    SessionExpiredOrRevoked,

    /// A retired refresh token was presented again; the chain has been torn down
    #[error("Refresh token reuse detected")]
    ReplayDetected,

    /// The chain reached its absolute lifetime ceiling
    #[error("Session exceeded its maximum lifetime. Please login again")]
    SessionExpired,

    #[error("Token issuance failed: {message}")]
    IssuanceFailed { message: String },
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::MissingSessionId => error_codes::TOKEN_MISSING_SESSION_ID,
            TokenError::SessionExpiredOrRevoked => error_codes::SESSION_EXPIRED_OR_REVOKED,
            TokenError::ReplayDetected => error_codes::REFRESH_TOKEN_REUSED,
            TokenError::SessionExpired => error_codes::SESSION_EXPIRED,
            TokenError::IssuanceFailed { .. } => error_codes::TOKEN_ISSUANCE_FAILED,
        }
    }
}
