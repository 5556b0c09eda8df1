//! Access and refresh token validation

use tracing::{debug, warn};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::service::TokenService;
use super::session::{hash_token, hashes_match, session_key, tombstone_key, TOMBSTONE_VALUE};

impl<S: SessionStore> TokenService<S> {
    /// Decodes an access token. No store lookup.
    pub fn validate_access(&self, token: &str) -> Result<Claims, DomainError> {
        Ok(self.access_codec.decode(token, self.now())?)
    }

    /// Decodes a refresh token and checks it against its live session
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Session is live and holds this token's hash
    /// * `TokenError::MissingSessionId` - Token carries no `jti`
    /// * `TokenError::InvalidSignature` - Session is live for a different token
    /// * `TokenError::ReplayDetected` - Session id was already retired; remnants are torn down
    /// * `TokenError::SessionExpiredOrRevoked` - No session and no tombstone
    pub async fn validate_refresh(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.refresh_codec.decode(token, self.now())?;
        let jti = session_id(&claims)?.to_string();

        match self.store.get(&session_key(&jti), self.deadline()).await? {
            Some(stored) if hashes_match(&stored, &hash_token(token)) => Ok(claims),
            Some(_) => {
                warn!(jti = %jti, user_id = claims.user_id, "Refresh token does not match its session");
                Err(TokenError::InvalidSignature.into())
            }
            None => {
                let tombstone = self.store.get(&tombstone_key(&jti), self.deadline()).await?;
                if tombstone.is_some() {
                    warn!(jti = %jti, user_id = claims.user_id, "Refresh token reuse detected");
                    self.tear_down(&jti).await?;
                    Err(TokenError::ReplayDetected.into())
                } else {
                    debug!(jti = %jti, "Refresh session expired or revoked");
                    Err(TokenError::SessionExpiredOrRevoked.into())
                }
            }
        }
    }

    /// Removes whatever is left of a session id and keeps its tombstone alive
    pub(crate) async fn tear_down(&self, jti: &str) -> Result<(), DomainError> {
        self.store.delete(&session_key(jti), self.deadline()).await?;
        self.write_tombstone(jti).await
    }

    pub(crate) async fn write_tombstone(&self, jti: &str) -> Result<(), DomainError> {
        self.store
            .set(
                &tombstone_key(jti),
                TOMBSTONE_VALUE,
                self.config.jwt.reuse_grace_window,
                self.deadline(),
            )
            .await
    }
}

/// The `jti` of a refresh token; absent or empty is `MissingSessionId`
pub(crate) fn session_id(claims: &Claims) -> Result<&str, TokenError> {
    claims
        .jti
        .as_deref()
        .filter(|jti| !jti.is_empty())
        .ok_or(TokenError::MissingSessionId)
}
