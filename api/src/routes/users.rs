//! Profile routes, all behind `JwtAuth`

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/users/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.auth_service.get_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users/{id}
///
/// Users may read their own profile; admins may read any.
pub async fn get_user(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse {
    let user_id = path.into_inner();
    if let Err(error) = auth.ensure_self_or_admin(user_id) {
        return handle_domain_error(&error);
    }

    match state.auth_service.get_user(user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
