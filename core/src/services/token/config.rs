//! Configuration for the token service

use gk_shared::{ConfigError, JwtConfig};
use std::time::Duration;

/// Default deadline for a single session store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(200);

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secrets, lifetimes and issuer
    pub jwt: JwtConfig,
    /// Deadline applied to every session store call
    pub store_timeout: Duration,
}

impl TokenServiceConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.store_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                message: "session store timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn access_ttl_seconds(&self) -> i64 {
        whole_seconds(self.jwt.access_ttl)
    }

    pub(crate) fn refresh_ttl_seconds(&self) -> i64 {
        whole_seconds(self.jwt.refresh_ttl)
    }

    pub(crate) fn session_max_lifetime_seconds(&self) -> i64 {
        whole_seconds(self.jwt.session_max_lifetime)
    }
}

/// Saturating conversion; `validate` keeps every lifetime far below `i64::MAX`.
fn whole_seconds(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
