//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the Bearer access token from the Authorization header, verifies it
//! with the [`AccessTokenVerifier`] registered as app data and injects an
//! [`AuthContext`] into the request. Access tokens are checked statelessly;
//! the session store is never consulted here.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use gk_core::{
    domain::entities::{token::Claims, user::Role},
    errors::{AuthError, DomainError},
    services::AccessTokenVerifier,
};

use crate::handlers::handle_domain_error;

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }

    /// Admins may act on any user, everyone else only on themselves
    pub fn ensure_self_or_admin(&self, user_id: i64) -> Result<(), DomainError> {
        if self.user_id == user_id || self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let context = authenticate(&req).map_err(reject)?;
            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, DomainError> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingToken)?;

    let verifier = req
        .app_data::<web::Data<AccessTokenVerifier>>()
        .ok_or_else(|| DomainError::Config {
            message: "access token verifier is not registered".to_string(),
        })?;

    verifier.verify(&token).map(AuthContext::from_claims)
}

fn reject(error: DomainError) -> Error {
    let response = handle_domain_error(&error);
    InternalError::from_response(error, response).into()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| reject(AuthError::MissingToken.into()));

        ready(result)
    }
}
