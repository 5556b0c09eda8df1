//! Session store trait: the key-value contract behind refresh-token sessions.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::DomainError;

/// Key-value store with per-key TTL holding refresh sessions and reuse tombstones.
///
/// Every call carries an explicit `deadline`. Implementations must report a
/// timeout or connection failure as [`DomainError::StoreUnavailable`] and never
/// as a missing key, otherwise an outage would read as a revoked session.
/// Implementations do not retry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write `value` under `key`, replacing any existing value, expiring after `ttl`
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        deadline: Duration,
    ) -> Result<(), DomainError>;

    /// Read the live value under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present and not expired
    /// * `Ok(None)` - Key absent or expired
    /// * `Err(DomainError::StoreUnavailable)` - Store did not answer in time
    async fn get(&self, key: &str, deadline: Duration) -> Result<Option<String>, DomainError>;

    /// Remove `key`
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed a live key
    /// * `Ok(false)` - Nothing was there; a concurrent caller may have removed it first
    ///
    /// Per-key atomic: of several concurrent deletes of the same live key,
    /// exactly one observes `true`.
    async fn delete(&self, key: &str, deadline: Duration) -> Result<bool, DomainError>;
}

#[async_trait]
impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        deadline: Duration,
    ) -> Result<(), DomainError> {
        (**self).set(key, value, ttl, deadline).await
    }

    async fn get(&self, key: &str, deadline: Duration) -> Result<Option<String>, DomainError> {
        (**self).get(key, deadline).await
    }

    async fn delete(&self, key: &str, deadline: Duration) -> Result<bool, DomainError> {
        (**self).delete(key, deadline).await
    }
}
