//! Refresh token rotation
//!
//! Runs `Validated -> ChainAgeChecked -> OldSessionRetired -> NewSessionIssued`.
//! The old session is deleted and tombstoned before anything new is minted, so
//! an interruption at any point leaves at most a revoked chain, never two live
//! sessions.

use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::service::TokenService;
use super::session::session_key;
use super::validator::session_id;

impl<S: SessionStore> TokenService<S> {
    /// Exchanges a live refresh token for a new pair in the same chain
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access and refresh tokens; the presented token is retired
    /// * `TokenError::SessionExpired` - Chain reached its absolute lifetime; session deleted
    /// * `TokenError::ReplayDetected` - Token already used, including by a concurrent request
    /// * any error from [`validate_refresh`](Self::validate_refresh), unchanged
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.validate_refresh(refresh_token).await?;
        let jti = session_id(&claims)?.to_string();
        let chain_origin = claims.iat;

        let ceiling = chain_origin.saturating_add(self.config.session_max_lifetime_seconds());
        if self.now() >= ceiling {
            warn!(jti = %jti, user_id = claims.user_id, "Session reached its maximum lifetime");
            self.store.delete(&session_key(&jti), self.deadline()).await?;
            return Err(TokenError::SessionExpired.into());
        }

        let removed = self.store.delete(&session_key(&jti), self.deadline()).await?;
        self.write_tombstone(&jti).await?;
        if !removed {
            warn!(jti = %jti, user_id = claims.user_id, "Lost rotation race; treating as reuse");
            return Err(TokenError::ReplayDetected.into());
        }

        let pair = self
            .issue_token_pair(&claims.identity(), Some(chain_origin))
            .await?;
        info!(user_id = claims.user_id, retired_jti = %jti, "Rotated refresh token");
        Ok(pair)
    }
}
