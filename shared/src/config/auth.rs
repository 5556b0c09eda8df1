//! Authentication configuration: token secrets, lifetimes and the refresh cookie

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{ConfigError, Lookup};

const DEFAULT_ACCESS_TTL: &str = "10m";
const DEFAULT_REFRESH_TTL: &str = "7d";
const DEFAULT_REUSE_GRACE: &str = "2m";
const DEFAULT_SESSION_MAX_LIFETIME: &str = "30d";
const DEFAULT_ISSUER: &str = "auth-service";

/// Upper bound for every token and session lifetime (10 years)
pub const MAX_LIFETIME: Duration = Duration::from_secs(10 * 365 * 86_400);

/// JWT signing and session lifetime configuration
///
/// Access and refresh tokens are signed with distinct secrets so that leaking
/// one cannot be used to forge the other kind.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret for access tokens
    pub access_secret: String,

    /// Access token lifetime
    pub access_ttl: Duration,

    /// HMAC secret for refresh tokens
    pub refresh_secret: String,

    /// Sliding refresh window, reset on every rotation
    pub refresh_ttl: Duration,

    /// How long a rotated or revoked session id is remembered for replay detection
    pub reuse_grace_window: Duration,

    /// Absolute ceiling on a rotation chain, measured from the original login
    pub session_max_lifetime: Duration,

    /// `iss` claim written into and required from every token
    pub issuer: String,
}

impl JwtConfig {
    /// Create a configuration with the given secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            access_ttl: Duration::from_secs(10 * 60),
            refresh_secret: refresh_secret.into(),
            refresh_ttl: Duration::from_secs(7 * 86_400),
            reuse_grace_window: Duration::from_secs(2 * 60),
            session_max_lifetime: Duration::from_secs(30 * 86_400),
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::env_lookup)
    }

    /// Load from an explicit key lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let access_secret = required(lookup, "JWT_SECRET")?;
        let refresh_secret = required(lookup, "JWT_REFRESH_SECRET")?;

        let config = Self {
            access_secret,
            access_ttl: duration_or(lookup, "JWT_EXPIRED", DEFAULT_ACCESS_TTL)?,
            refresh_secret,
            refresh_ttl: duration_or(lookup, "JWT_REFRESH_EXPIRED", DEFAULT_REFRESH_TTL)?,
            reuse_grace_window: duration_or(lookup, "JWT_REUSE_GRACE", DEFAULT_REUSE_GRACE)?,
            session_max_lifetime: duration_or(
                lookup,
                "JWT_SESSION_MAX_LIFETIME",
                DEFAULT_SESSION_MAX_LIFETIME,
            )?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the sliding refresh window
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Set the replay-detection grace window
    pub fn with_reuse_grace_window(mut self, window: Duration) -> Self {
        self.reuse_grace_window = window;
        self
    }

    /// Set the absolute chain lifetime
    pub fn with_session_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_max_lifetime = lifetime;
        self
    }

    /// Check the configuration is usable for signing and session tracking
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "JWT_SECRET".to_string(),
            });
        }
        if self.refresh_secret.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "JWT_REFRESH_SECRET".to_string(),
            });
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Invalid {
                message: "access and refresh secrets must differ".to_string(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "JWT_ISSUER".to_string(),
            });
        }

        for (key, value) in [
            ("JWT_EXPIRED", self.access_ttl),
            ("JWT_REFRESH_EXPIRED", self.refresh_ttl),
            ("JWT_REUSE_GRACE", self.reuse_grace_window),
            ("JWT_SESSION_MAX_LIFETIME", self.session_max_lifetime),
        ] {
            if value.as_secs() == 0 || value > MAX_LIFETIME {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: format!("{:?}", value),
                });
            }
        }

        if self.session_max_lifetime < self.refresh_ttl {
            return Err(ConfigError::Invalid {
                message: "session max lifetime must not be shorter than the refresh window"
                    .to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_secret", &"<redacted>")
            .field("refresh_ttl", &self.refresh_ttl)
            .field("reuse_grace_window", &self.reuse_grace_window)
            .field("session_max_lifetime", &self.session_max_lifetime)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Refresh token cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Cookie path; the refresh token is only sent to the auth endpoints
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// SameSite attribute ("Strict", "Lax" or "None")
    pub same_site: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            path: String::from("/api/v1/auth"),
            secure: true,
            same_site: String::from("Strict"),
        }
    }
}

impl CookieConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let same_site = lookup("REFRESH_COOKIE_SAME_SITE").unwrap_or(defaults.same_site);
        if !matches!(same_site.as_str(), "Strict" | "Lax" | "None") {
            return Err(ConfigError::InvalidValue {
                key: "REFRESH_COOKIE_SAME_SITE".to_string(),
                value: same_site,
            });
        }

        Ok(Self {
            name: lookup("REFRESH_COOKIE_NAME").unwrap_or(defaults.name),
            path: lookup("REFRESH_COOKIE_PATH").unwrap_or(defaults.path),
            secure: super::parse_or(lookup, "REFRESH_COOKIE_SECURE", defaults.secure)?,
            same_site,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::env_lookup)
    }

    /// Create from an explicit key lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            cookie: CookieConfig::from_lookup(lookup)?,
        })
    }
}

/// Parse a Go-style duration string such as `10m`, `7d`, `1h30m` or `250ms`.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        value: input.to_string(),
    };

    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60).ok_or_else(invalid)?),
            "h" => Duration::from_secs(value.checked_mul(3_600).ok_or_else(invalid)?),
            "d" => Duration::from_secs(value.checked_mul(86_400).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];
        total = total.checked_add(part).ok_or_else(invalid)?;
    }

    Ok(total)
}

fn required(lookup: Lookup<'_>, key: &str) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })
}

fn duration_or(lookup: Lookup<'_>, key: &str, default: &str) -> Result<Duration, ConfigError> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse_duration(&raw).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw,
    })
}
