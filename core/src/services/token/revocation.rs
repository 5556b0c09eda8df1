//! Logout

use tracing::{debug, info};

use crate::errors::DomainError;
use crate::repositories::SessionStore;

use super::service::TokenService;
use super::session::session_key;

impl<S: SessionStore> TokenService<S> {
    /// Ends the session behind a refresh token
    ///
    /// Expired, already rotated, or undecodable tokens are a successful no-op
    /// for the caller. Only store unavailability is surfaced.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        let claims = match self.refresh_codec.decode_allow_expired(refresh_token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(error = %err, "Ignoring revocation of an invalid refresh token");
                return Ok(());
            }
        };
        let Some(jti) = claims.jti.as_deref().filter(|jti| !jti.is_empty()) else {
            debug!("Ignoring revocation of a refresh token without session id");
            return Ok(());
        };

        let removed = self.store.delete(&session_key(jti), self.deadline()).await?;
        self.write_tombstone(jti).await?;

        info!(user_id = claims.user_id, jti = %jti, removed, "Revoked refresh session");
        Ok(())
    }
}
