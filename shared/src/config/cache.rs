//! Session store configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ConfigError, Lookup};

/// Session store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    /// Shared Redis instance; required whenever more than one process serves traffic
    Redis,
    /// Process-local map, for development and tests
    Memory,
}

impl std::str::FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "in-memory" => Ok(CacheType::Memory),
            _ => Err(format!("Invalid cache type: {}", s)),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend selection
    pub cache_type: CacheType,

    /// Redis connection URL
    pub url: String,

    /// Optional prefix prepended to every key (e.g. a deployment name)
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Deadline applied to every individual store operation, in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::Memory,
            url: String::from("redis://localhost:6379"),
            key_prefix: None,
            operation_timeout_ms: default_operation_timeout_ms(),
            connection_timeout: 5,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::env_lookup)
    }

    /// Create from an explicit key lookup
    ///
    /// Without `CACHE_TYPE`, Redis is selected when `REDIS_URL` is present and
    /// the in-memory store otherwise.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let url = lookup("REDIS_URL");

        let cache_type = match lookup("CACHE_TYPE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CACHE_TYPE".to_string(),
                value: raw,
            })?,
            None if url.is_some() => CacheType::Redis,
            None => CacheType::Memory,
        };

        let operation_timeout_ms = super::parse_or(
            lookup,
            "REDIS_OPERATION_TIMEOUT_MS",
            defaults.operation_timeout_ms,
        )?;
        if operation_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REDIS_OPERATION_TIMEOUT_MS".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            cache_type,
            url: url.unwrap_or(defaults.url),
            key_prefix: lookup("REDIS_KEY_PREFIX"),
            operation_timeout_ms,
            connection_timeout: super::parse_or(
                lookup,
                "REDIS_CONNECTION_TIMEOUT",
                defaults.connection_timeout,
            )?,
        })
    }

    /// Per-operation deadline as a `Duration`
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

fn default_operation_timeout_ms() -> u64 {
    200
}
