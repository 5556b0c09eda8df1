use serde::{Deserialize, Serialize};
use validator::Validate;

use gk_core::domain::entities::token::{TokenPair, TOKEN_TYPE_BEARER};

use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name, letters and spaces
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Body accepted by refresh and logout when the cookie is not available
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Access token handed to the client. The refresh token travels in the cookie only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl AccessTokenResponse {
    pub fn from_pair(tokens: &TokenPair, user: Option<UserResponse>) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: tokens.access_expires_in,
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
