use actix_web::{web, HttpRequest, HttpResponse};

use gk_shared::error_codes;

use crate::app::AppState;
use crate::dto::{ErrorResponse, ErrorResponseExt, LogoutResponse, RefreshTokenRequest};
use crate::handlers::handle_domain_error;

use super::cookie::{expired_refresh_cookie, read_refresh_token};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the session behind the refresh token and clears the cookie.
/// Logging out with an already revoked, expired or garbled token succeeds.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Logged out successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: No refresh token in cookie or body
/// - 503 Service Unavailable: Session store unreachable
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let token = match read_refresh_token(&req, &state.cookie, body.map(|b| b.into_inner())) {
        Some(token) => token,
        None => {
            return ErrorResponse::new(error_codes::MISSING_TOKEN, "Refresh token is required")
                .to_response(actix_web::http::StatusCode::BAD_REQUEST)
        }
    };

    match state.auth_service.logout(&token).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(expired_refresh_cookie(&state.cookie))
            .json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }),
        Err(error) => handle_domain_error(&error),
    }
}
