//! Shared error response structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes shared between the core error taxonomy and the HTTP layer
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const BAD_REQUEST: &str = "bad_request";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const CONFIG_ERROR: &str = "config_error";
    pub const DATABASE_ERROR: &str = "database_error";
    pub const STORE_UNAVAILABLE: &str = "session_store_unavailable";

    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const USER_ALREADY_EXISTS: &str = "user_already_exists";
    pub const MISSING_TOKEN: &str = "missing_token";

    pub const TOKEN_MALFORMED: &str = "token_malformed";
    pub const TOKEN_INVALID_SIGNATURE: &str = "token_invalid_signature";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const TOKEN_MISSING_SESSION_ID: &str = "token_missing_session_id";
    pub const SESSION_EXPIRED_OR_REVOKED: &str = "session_expired_or_revoked";
    pub const SESSION_EXPIRED: &str = "session_expired";
    pub const REFRESH_TOKEN_REUSED: &str = "refresh_token_reused";
    pub const TOKEN_ISSUANCE_FAILED: &str = "token_issuance_failed";
}
