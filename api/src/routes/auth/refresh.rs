use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;

use gk_core::errors::{AuthError, DomainError, TokenError};

use crate::app::AppState;
use crate::dto::{AccessTokenResponse, RefreshTokenRequest};
use crate::handlers::handle_domain_error;

use super::cookie::{expired_refresh_cookie, read_refresh_token, refresh_cookie};

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token from the cookie (or the `refresh_token` body
/// field) and returns a new access token with a replacement cookie.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or revoked refresh token
/// - 401 Unauthorized `refresh_token_reused`: The token was already rotated;
///   the refresh cookie is cleared and the client must log in again
/// - 503 Service Unavailable: Session store unreachable
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let token = match read_refresh_token(&req, &state.cookie, body.map(|b| b.into_inner())) {
        Some(token) => token,
        None => return handle_domain_error(&AuthError::MissingToken.into()),
    };

    match state.auth_service.refresh(&token).await {
        Ok(tokens) => HttpResponse::Ok()
            .cookie(refresh_cookie(
                &state.cookie,
                &tokens.refresh_token,
                tokens.refresh_expires_in,
            ))
            .json(AccessTokenResponse::from_pair(&tokens, None)),
        Err(error) => {
            let mut response = handle_domain_error(&error);
            if matches!(error, DomainError::Token(TokenError::ReplayDetected)) {
                if let Err(e) = response.add_cookie(&expired_refresh_cookie(&state.cookie)) {
                    warn!("Failed to clear refresh cookie: {}", e);
                }
            }
            response
        }
    }
}
