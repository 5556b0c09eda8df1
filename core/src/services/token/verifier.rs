//! Stateless access token verification for request middleware.

use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::errors::DomainError;
use crate::services::clock::Clock;

use super::codec::TokenCodec;

/// Cheap clonable handle that validates access tokens without touching the store
#[derive(Clone)]
pub struct AccessTokenVerifier {
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl AccessTokenVerifier {
    pub(crate) fn new(codec: Arc<TokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self { codec, clock }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        Ok(self.codec.decode(token, self.clock.now().timestamp())?)
    }
}
