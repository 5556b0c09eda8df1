//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::{Identity, Role};

/// Value of the `token_type` field handed to clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Which of the two token kinds a set of claims belongs to.
///
/// Signed into every token so that an access token can never be replayed as a
/// refresh token even if both secrets were accidentally configured alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as a string)
    pub sub: String,

    pub user_id: i64,

    pub username: String,

    pub role: Role,

    pub kind: TokenKind,

    /// Issuer
    pub iss: String,

    /// Issued at. For refresh tokens this is the chain origin and is carried
    /// unchanged across rotations.
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Session id, present on refresh tokens only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jti: Option<String>,
}

impl Claims {
    pub fn new(
        identity: &Identity,
        kind: TokenKind,
        issuer: impl Into<String>,
        iat: i64,
        exp: i64,
        jti: Option<String>,
    ) -> Self {
        Self {
            sub: identity.user_id.to_string(),
            user_id: identity.user_id,
            username: identity.username.clone(),
            role: identity.role,
            kind,
            iss: issuer.into(),
            iat,
            exp,
            jti,
        }
    }

    /// The identity snapshot this token was issued for
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
            role: self.role,
        }
    }

    /// Checks expiry against the supplied unix time
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Access and refresh tokens handed to a client together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,

    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            access_expires_in,
            refresh_expires_in,
        }
    }
}
