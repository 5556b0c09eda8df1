//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use gk_core::repositories::UserRepository;
use gk_core::services::{AccessTokenVerifier, AuthService, PasswordHasher, TokenLifecycle};
use gk_shared::CookieConfig;

use crate::handlers::handle_bad_request;
use crate::middleware::JwtAuth;
use crate::routes::{auth, users};

/// Auth service over trait objects so the backends can be chosen at startup
pub type DynAuthService = AuthService<dyn UserRepository, dyn TokenLifecycle, dyn PasswordHasher>;

/// Application state shared by all workers
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    /// Attributes of the refresh token cookie
    pub cookie: CookieConfig,
}

impl AppState {
    pub fn new(auth_service: Arc<DynAuthService>, cookie: CookieConfig) -> Self {
        Self {
            auth_service,
            cookie,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    verifier: web::Data<AccessTokenVerifier>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(verifier)
        .app_data(json_config())
        // Request spans
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/refresh", web::post().to(auth::refresh))
                        .route("/logout", web::post().to(auth::logout)),
                )
                .service(
                    web::scope("/users")
                        .wrap(JwtAuth::new())
                        .route("/me", web::get().to(users::me))
                        .route("/{id}", web::get().to(users::get_user)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// JSON extractor configuration answering malformed bodies with a 400 error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = handle_bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "gatekeep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
