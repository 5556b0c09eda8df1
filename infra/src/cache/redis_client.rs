//! Redis cache client implementation
//!
//! A thin async client over a multiplexed connection. Every operation runs
//! under a caller-supplied deadline and is attempted exactly once; a timeout
//! is reported as [`InfrastructureError::Timeout`], never as a missing key.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use gk_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis cache client
///
/// Cheap to clone; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to Redis
    ///
    /// # Example
    /// ```no_run
    /// use gk_infra::cache::RedisClient;
    /// use gk_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig {
    ///         url: "redis://localhost:6379".to_string(),
    ///         ..CacheConfig::default()
    ///     };
    ///     Ok(RedisClient::new(config).await?)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let connection = run_with_deadline(
            "CONNECT",
            connect_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await?;

        info!("Redis client created successfully");
        Ok(Self { connection, config })
    }

    /// Default per-operation deadline from configuration
    pub fn operation_timeout(&self) -> Duration {
        self.config.operation_timeout()
    }

    /// Applies the configured key prefix
    pub(crate) fn prefixed(&self, key: &str) -> String {
        prefixed_key(self.config.key_prefix.as_deref(), key)
    }

    /// Set a value that expires after `ttl` (millisecond precision)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        deadline: Duration,
    ) -> Result<(), InfrastructureError> {
        let key = self.prefixed(key);
        let ttl_ms = ttl.as_millis().max(1) as u64;
        debug!("Setting key '{}' with expiry {}ms", key, ttl_ms);

        let mut conn = self.connection.clone();
        run_with_deadline("SET", deadline, async move {
            redis::cmd("SET")
                .arg(&key)
                .arg(value)
                .arg("PX")
                .arg(ttl_ms)
                .query_async::<_, ()>(&mut conn)
                .await
        })
        .await
    }

    /// Get a value
    ///
    /// # Returns
    /// * `Ok(None)` - Key not found or expired
    pub async fn get(
        &self,
        key: &str,
        deadline: Duration,
    ) -> Result<Option<String>, InfrastructureError> {
        let key = self.prefixed(key);
        debug!("Getting key '{}'", key);

        let mut conn = self.connection.clone();
        run_with_deadline("GET", deadline, async move {
            conn.get::<_, Option<String>>(key).await
        })
        .await
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the key
    /// * `Ok(false)` - Key was not there
    pub async fn delete(&self, key: &str, deadline: Duration) -> Result<bool, InfrastructureError> {
        let key = self.prefixed(key);
        debug!("Deleting key '{}'", key);

        let mut conn = self.connection.clone();
        let deleted = run_with_deadline("DEL", deadline, async move {
            conn.del::<_, u32>(key).await
        })
        .await?;
        Ok(deleted > 0)
    }

    /// Check if the Redis connection is healthy with a PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.connection.clone();
        let response = run_with_deadline("PING", self.operation_timeout(), async move {
            redis::cmd("PING").query_async::<_, String>(&mut conn).await
        })
        .await?;

        if response == "PONG" {
            debug!("Redis health check passed");
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }
}

/// Runs one Redis operation under a deadline, without retrying
pub(crate) async fn run_with_deadline<T, F>(
    operation: &str,
    deadline: Duration,
    fut: F,
) -> Result<T, InfrastructureError>
where
    F: Future<Output = RedisResult<T>>,
{
    match timeout(deadline, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!("Redis {} failed: {}", operation, e);
            Err(InfrastructureError::Cache(e))
        }
        Err(_) => {
            error!("Redis {} timed out after {:?}", operation, deadline);
            Err(InfrastructureError::Timeout {
                operation: operation.to_string(),
                after_ms: deadline.as_millis(),
            })
        }
    }
}

pub(crate) fn prefixed_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, key),
        _ => key.to_string(),
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
