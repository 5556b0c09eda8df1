use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AccessTokenResponse, LoginRequest, UserResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::cookie::refresh_cookie;

/// Handler for POST /api/v1/auth/login
///
/// Starts a new token chain. The access token is returned in the body, the
/// refresh token only as an HttpOnly cookie.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 600,
///     "user": { "id": 1, "name": "Ada Lovelace", "username": "ada", "role": "user", ... }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown user or wrong password
/// - 503 Service Unavailable: Session store unreachable
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(session) => {
            let user = UserResponse::from(&session.user);
            HttpResponse::Ok()
                .cookie(refresh_cookie(
                    &state.cookie,
                    &session.tokens.refresh_token,
                    session.tokens.refresh_expires_in,
                ))
                .json(AccessTokenResponse::from_pair(&session.tokens, Some(user)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
