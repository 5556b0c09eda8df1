//! Shared fixtures for the HTTP tests: in-memory store and user directory,
//! low-cost bcrypt.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use std::sync::Arc;
use std::time::Duration;

use gk_api::startup::{assemble, Services};
use gk_core::domain::entities::user::{NewUser, Role};
use gk_core::repositories::UserRepository;
use gk_core::services::PasswordHasher;
use gk_infra::cache::MemorySessionStore;
use gk_infra::database::InMemoryUserRepository;
use gk_infra::security::BcryptPasswordHasher;
use gk_shared::{AuthConfig, CookieConfig, JwtConfig};

pub const PASSWORD: &str = "analytical-engine";

pub struct TestContext {
    pub services: Services,
    pub users: Arc<InMemoryUserRepository>,
    pub hasher: Arc<BcryptPasswordHasher>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let auth = AuthConfig {
            jwt: JwtConfig::new("access-secret-for-tests", "refresh-secret-for-tests"),
            cookie: CookieConfig::default(),
        };

        let services = assemble(
            Arc::new(MemorySessionStore::new()),
            users.clone(),
            hasher.clone(),
            &auth,
            Duration::from_millis(200),
        )
        .expect("services");

        Self {
            services,
            users,
            hasher,
        }
    }

    /// Inserts a user directly, bypassing registration (the only way to get an admin)
    pub async fn seed_user(&self, username: &str, role: Role) -> i64 {
        self.users
            .create(NewUser {
                name: "Seeded User".to_string(),
                username: username.to_string(),
                password_hash: self.hasher.hash(PASSWORD).unwrap(),
                role,
            })
            .await
            .unwrap()
            .id
    }
}

/// The refresh cookie set on a response, if any
pub fn refresh_cookie_of<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.into_owned())
}

/// Builds the app and evaluates to it
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(gk_api::app::create_app(
            $ctx.services.state.clone(),
            $ctx.services.verifier.clone(),
        ))
        .await
    };
}
