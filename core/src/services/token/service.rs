//! Main token service implementation

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::entities::user::Identity;
use crate::errors::DomainError;
use crate::repositories::SessionStore;
use crate::services::clock::{Clock, SystemClock};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::verifier::AccessTokenVerifier;
use super::TokenLifecycle;

/// Service managing access tokens and store-backed refresh sessions
pub struct TokenService<S: SessionStore> {
    pub(crate) store: S,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: TokenServiceConfig,
    pub(crate) access_codec: Arc<TokenCodec>,
    pub(crate) refresh_codec: TokenCodec,
}

impl<S: SessionStore> TokenService<S> {
    /// Creates a token service on the wall clock
    ///
    /// # Returns
    ///
    /// `DomainError::Config` if a secret is missing or a lifetime is unusable
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Creates a token service with an injected time source
    pub fn with_clock(
        store: S,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let issuer = config.jwt.issuer.clone();
        let access_codec = Arc::new(TokenCodec::new(
            &config.jwt.access_secret,
            TokenKind::Access,
            issuer.clone(),
        ));
        let refresh_codec = TokenCodec::new(&config.jwt.refresh_secret, TokenKind::Refresh, issuer);

        Ok(Self {
            store,
            clock,
            config,
            access_codec,
            refresh_codec,
        })
    }

    /// Handle for verifying access tokens outside the service, e.g. in middleware
    pub fn access_verifier(&self) -> AccessTokenVerifier {
        AccessTokenVerifier::new(self.access_codec.clone(), self.clock.clone())
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now().timestamp()
    }

    pub(crate) fn deadline(&self) -> Duration {
        self.config.store_timeout
    }
}

#[async_trait]
impl<S: SessionStore> TokenLifecycle for TokenService<S> {
    async fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        self.issue_token_pair(identity, None).await
    }

    fn validate_access(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::validate_access(self, token)
    }

    async fn validate_refresh(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::validate_refresh(self, token).await
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        TokenService::rotate(self, refresh_token).await
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        TokenService::revoke(self, refresh_token).await
    }

    fn access_ttl_seconds(&self) -> i64 {
        self.config.access_ttl_seconds()
    }

    fn refresh_ttl_seconds(&self) -> i64 {
        self.config.refresh_ttl_seconds()
    }
}
