//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{ConfigError, Lookup};

/// Database configuration for the MySQL user directory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL; `None` selects the in-memory user directory
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::env_lookup)
    }

    /// Create from an explicit key lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: lookup("DATABASE_URL"),
            max_connections: super::parse_or(
                lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            connect_timeout: super::parse_or(
                lookup,
                "DATABASE_CONNECT_TIMEOUT",
                defaults.connect_timeout,
            )?,
            ..defaults
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set maximum connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::lookup_from;

    #[test]
    fn test_database_config_builder() {
        let config = DatabaseConfig::new("mysql://localhost/gatekeep").with_max_connections(25);
        assert_eq!(config.url.as_deref(), Some("mysql://localhost/gatekeep"));
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.connect_timeout, 30);
    }

    #[test]
    fn test_database_config_rejects_non_numeric_pool_size() {
        let lookup = lookup_from(&[("DATABASE_MAX_CONNECTIONS", "lots")]);
        assert!(DatabaseConfig::from_lookup(&lookup).is_err());
    }
}
