//! Redis-backed session store

use async_trait::async_trait;
use std::time::Duration;

use gk_core::errors::DomainError;
use gk_core::repositories::SessionStore;

use super::redis_client::RedisClient;

/// Session store on Redis: `SET .. PX`, `GET`, `DEL`.
///
/// `DEL` is atomic per key and returns the number of keys removed, which is
/// what the rotation engine relies on to pick a single winner.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        deadline: Duration,
    ) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(key, value, ttl, deadline)
            .await
            .map_err(DomainError::from)
    }

    async fn get(&self, key: &str, deadline: Duration) -> Result<Option<String>, DomainError> {
        self.client.get(key, deadline).await.map_err(DomainError::from)
    }

    async fn delete(&self, key: &str, deadline: Duration) -> Result<bool, DomainError> {
        self.client.delete(key, deadline).await.map_err(DomainError::from)
    }
}
