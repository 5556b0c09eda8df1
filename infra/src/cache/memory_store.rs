//! In-process session store for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use gk_core::errors::DomainError;
use gk_core::repositories::SessionStore;

/// Expired entries are swept on write once the map grows past this size
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Session store backed by a `HashMap` with lazy TTL expiry.
///
/// Single process only. Uses `tokio::time::Instant`, so paused-time tests can
/// drive expiry with `tokio::time::advance`.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    pub(crate) entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        _deadline: Duration,
    ) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.len() >= SWEEP_THRESHOLD {
            let before = entries.len();
            entries.retain(|_, e| e.is_live(now));
            debug!(swept = before - entries.len(), "Swept expired session entries");
        }

        let expires_at = now.checked_add(ttl).ok_or_else(|| DomainError::Internal {
            message: format!("TTL {:?} out of range", ttl),
        })?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str, _deadline: Duration) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn delete(&self, key: &str, _deadline: Duration) -> Result<bool, DomainError> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|e| e.is_live(now)))
    }
}
