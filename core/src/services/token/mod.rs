//! Token lifecycle: issuance, validation, rotation with reuse detection, and revocation
//!
//! Access tokens are stateless JWTs. Refresh tokens are JWTs backed by a
//! session record in a [`SessionStore`](crate::repositories::SessionStore):
//! - `refresh:<jti>` holds the SHA-256 of the live refresh token
//! - `refresh:used:<jti>` is a short-lived tombstone written when a session id
//!   is rotated or revoked; seeing it for a missing session means replay

mod codec;
mod config;
mod issuer;
mod revocation;
mod rotation;
mod service;
mod session;
mod validator;
mod verifier;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::Identity;
use crate::errors::DomainError;

pub use codec::TokenCodec;
pub use config::{TokenServiceConfig, DEFAULT_STORE_TIMEOUT};
pub use service::TokenService;
pub use session::{hash_token, session_key, tombstone_key};
pub use verifier::AccessTokenVerifier;

/// The token capability callers depend on. [`TokenService`] is the single implementation.
#[async_trait]
pub trait TokenLifecycle: Send + Sync {
    /// Mint an access token and a refresh token starting a new chain
    async fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, DomainError>;

    /// Stateless check of an access token
    fn validate_access(&self, token: &str) -> Result<Claims, DomainError>;

    /// Check a refresh token against its live session
    async fn validate_refresh(&self, token: &str) -> Result<Claims, DomainError>;

    /// Retire the presented refresh token and mint a replacement pair in the same chain
    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, DomainError>;

    /// End the session behind a refresh token. Idempotent.
    async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError>;

    fn access_ttl_seconds(&self) -> i64;

    fn refresh_ttl_seconds(&self) -> i64;
}
