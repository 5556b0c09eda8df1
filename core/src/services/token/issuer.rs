//! Minting access and refresh tokens

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::entities::user::Identity;
use crate::errors::DomainError;
use crate::repositories::SessionStore;

use super::service::TokenService;
use super::session::{hash_token, session_key};

impl<S: SessionStore> TokenService<S> {
    /// Mints a stateless access token valid for the access TTL
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, DomainError> {
        let now = self.now();
        let claims = Claims::new(
            identity,
            TokenKind::Access,
            self.access_codec.issuer(),
            now,
            now.saturating_add(self.config.access_ttl_seconds()),
            None,
        );
        Ok(self.access_codec.encode(&claims)?)
    }

    /// Mints a refresh token under a fresh session id and records its session
    ///
    /// # Arguments
    ///
    /// * `identity` - Who the token speaks for
    /// * `chain_origin` - `iat` of the chain's first token when rotating; `None` starts a chain
    ///
    /// The token is only returned once its session record is stored. A store
    /// failure yields `StoreUnavailable` and no token.
    pub async fn issue_refresh_token(
        &self,
        identity: &Identity,
        chain_origin: Option<i64>,
    ) -> Result<String, DomainError> {
        let now = self.now();
        let jti = Uuid::new_v4().to_string();
        let claims = Claims::new(
            identity,
            TokenKind::Refresh,
            self.refresh_codec.issuer(),
            chain_origin.unwrap_or(now),
            now.saturating_add(self.config.refresh_ttl_seconds()),
            Some(jti.clone()),
        );
        let token = self.refresh_codec.encode(&claims)?;

        debug!(jti = %jti, "Storing refresh session");
        self.store
            .set(
                &session_key(&jti),
                &hash_token(&token),
                self.config.jwt.refresh_ttl,
                self.deadline(),
            )
            .await?;

        info!(user_id = identity.user_id, jti = %jti, "Issued refresh token");
        Ok(token)
    }

    pub(crate) async fn issue_token_pair(
        &self,
        identity: &Identity,
        chain_origin: Option<i64>,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(identity)?;
        let refresh_token = self.issue_refresh_token(identity, chain_origin).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_ttl_seconds(),
            self.config.refresh_ttl_seconds(),
        ))
    }
}
