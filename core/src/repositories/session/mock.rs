//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::DomainError;
use crate::services::clock::Clock;

use super::trait_::SessionStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory session store whose TTLs follow an injected clock
pub struct MockSessionStore {
    clock: Arc<dyn Clock>,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    unavailable: AtomicBool,
    lost_races: Arc<RwLock<HashSet<String>>>,
}

impl MockSessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
            lost_races: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make every subsequent call fail as if the store timed out
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The next delete of `key` removes it but reports that nothing was there,
    /// as when a concurrent request deleted it first
    pub async fn lose_next_delete_race(&self, key: &str) {
        self.lost_races.write().await.insert(key.to_string());
    }

    /// Live value under `key`, bypassing availability checks
    pub async fn peek(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.value.clone())
    }

    /// Seconds until `key` expires
    pub async fn ttl_seconds(&self, key: &str) -> Option<i64> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| (e.expires_at - now).num_seconds())
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mock store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        _deadline: Duration,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| DomainError::Internal {
            message: e.to_string(),
        })?;
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::Internal {
                message: "TTL out of range".to_string(),
            })?;
        let entry = Entry {
            value: value.to_string(),
            expires_at,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str, _deadline: Duration) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        Ok(self.peek(key).await)
    }

    async fn delete(&self, key: &str, _deadline: Duration) -> Result<bool, DomainError> {
        self.check_available()?;
        let now = self.clock.now();
        let removed = self.entries.write().await.remove(key);
        let lost_race = self.lost_races.write().await.remove(key);
        Ok(!lost_race && removed.is_some_and(|e| e.expires_at > now))
    }
}
