use actix_web::{web, HttpResponse};
use validator::Validate;

use gk_core::services::RegisterInput;

use crate::app::AppState;
use crate::dto::{RegisterRequest, UserResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "name": "Ada Lovelace", "username": "ada", "password": "analytical" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The created user, without credentials.
///
/// ## Errors
/// - 400 Bad Request: Missing fields, bad name, username or password
/// - 409 Conflict: Username already taken
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let request = request.into_inner();
    let input = RegisterInput {
        name: request.name,
        username: request.username,
        password: request.password,
    };

    match state.auth_service.register(input).await {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
