//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - token secrets, lifetimes and the refresh cookie
//! - `cache` - session store backend (Redis or in-memory)
//! - `database` - user directory connection pool
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP bind address
//!
//! Every loader has a `from_env` entry point and a `from_lookup` variant that
//! takes an explicit key lookup, so configuration is read exactly once at
//! startup and tests never touch the process environment.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{parse_duration, AuthConfig, CookieConfig, JwtConfig};
pub use cache::{CacheConfig, CacheType};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Errors raised while loading or validating configuration.
///
/// All of these are fatal at startup: the server must not serve requests with
/// a missing secret or an unusable lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid duration: {value}")]
    InvalidDuration { value: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Key lookup used by the `from_lookup` loaders.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads a key from the process environment, treating empty values as unset.
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parses an optional numeric key, falling back to `default` when unset.
pub(crate) fn parse_or<T: std::str::FromStr>(
    lookup: Lookup<'_>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Session store configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// Load configuration from an explicit key lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL") {
            logging.level = level;
        }

        let config = Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            auth: AuthConfig::from_lookup(lookup)?,
            cache: CacheConfig::from_lookup(lookup)?,
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// Cross-section checks that no single section can make on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.jwt.validate()?;

        if self.environment.is_production() {
            if !self.auth.cookie.secure {
                return Err(ConfigError::Invalid {
                    message: "refresh cookie must be Secure in production".to_string(),
                });
            }
            if self.database.url.is_none() {
                return Err(ConfigError::Missing {
                    key: "DATABASE_URL".to_string(),
                });
            }
            if self.cache.cache_type != CacheType::Redis {
                return Err(ConfigError::Invalid {
                    message: "production requires the redis session store".to_string(),
                });
            }
        }

        Ok(())
    }
}
