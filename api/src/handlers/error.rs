//! Domain error to HTTP response mapping

use actix_web::{http::StatusCode, HttpResponse};
use tracing::{error, warn};

use gk_core::errors::{AuthError, DomainError, TokenError};
use gk_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Config { .. } | DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        },
        DomainError::Token(TokenError::IssuanceFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

/// Client-facing message; server-side failures are not described to the caller
fn message_for(error: &DomainError, status: StatusCode) -> String {
    if error.is_unavailable() {
        "Session store is temporarily unavailable. Please try again later".to_string()
    } else if status.is_server_error() {
        "An internal error occurred".to_string()
    } else {
        error.to_string()
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        error!(code = error.error_code(), "Request failed: {}", error);
    } else if matches!(error, DomainError::Token(TokenError::ReplayDetected)) {
        warn!("Rejected reused refresh token");
    }

    ErrorResponse::new(error.error_code(), message_for(error, status)).to_response(status)
}

/// 400 response for request bodies rejected by `validator`
pub fn handle_validation_errors(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }
    response.to_response(StatusCode::BAD_REQUEST)
}

/// 400 response for bodies that are not valid JSON for the endpoint
pub fn handle_bad_request(message: impl Into<String>) -> HttpResponse {
    ErrorResponse::new(error_codes::BAD_REQUEST, message).to_response(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Token(TokenError::Malformed), StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::ReplayDetected), StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::SessionExpired), StatusCode::UNAUTHORIZED),
            (AuthError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AuthError::InsufficientPermissions.into(), StatusCode::FORBIDDEN),
            (AuthError::UserNotFound.into(), StatusCode::NOT_FOUND),
            (AuthError::UserAlreadyExists.into(), StatusCode::CONFLICT),
            (
                DomainError::Validation {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::StoreUnavailable {
                    message: "timeout".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::Database {
                    message: "down".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(status_for(&error), status, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_replay_body_code() {
        let resp = handle_domain_error(&DomainError::Token(TokenError::ReplayDetected));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "refresh_token_reused");
    }

    #[actix_web::test]
    async fn test_internal_details_are_hidden() {
        let resp = handle_domain_error(&DomainError::Database {
            message: "connection refused at 10.0.0.3".to_string(),
        });

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "database_error");
        assert_eq!(json["message"], "An internal error occurred");
    }
}
