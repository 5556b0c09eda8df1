//! Service wiring: picks the session store and user directory backends from
//! configuration and assembles the token and auth services.

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use gk_core::errors::DomainError;
use gk_core::repositories::{SessionStore, UserRepository};
use gk_core::services::{
    AccessTokenVerifier, AuthService, PasswordHasher, TokenLifecycle, TokenService,
    TokenServiceConfig,
};
use gk_infra::cache::{MemorySessionStore, RedisClient, RedisSessionStore};
use gk_infra::database::{DatabasePool, InMemoryUserRepository, MySqlUserRepository};
use gk_infra::security::BcryptPasswordHasher;
use gk_shared::{AppConfig, AuthConfig, CacheType};

use crate::app::{AppState, DynAuthService};

/// Everything the HTTP app needs, ready to hand to `create_app`
#[derive(Clone)]
pub struct Services {
    pub state: web::Data<AppState>,
    pub verifier: web::Data<AccessTokenVerifier>,
}

/// Builds the services over already constructed backends
pub fn assemble(
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    auth: &AuthConfig,
    store_timeout: Duration,
) -> Result<Services, DomainError> {
    let config = TokenServiceConfig::new(auth.jwt.clone()).with_store_timeout(store_timeout);
    let token_service = TokenService::new(sessions, config)?;
    let verifier = token_service.access_verifier();

    let tokens: Arc<dyn TokenLifecycle> = Arc::new(token_service);
    let auth_service: Arc<DynAuthService> = Arc::new(AuthService::new(users, tokens, hasher));

    Ok(Services {
        state: web::Data::new(AppState::new(auth_service, auth.cookie.clone())),
        verifier: web::Data::new(verifier),
    })
}

/// Connects the configured backends and assembles the services
///
/// Returns the database pool as well, when one is configured, so the caller
/// can close it on shutdown.
pub async fn build(config: &AppConfig) -> anyhow::Result<(Services, Option<DatabasePool>)> {
    let sessions: Arc<dyn SessionStore> = match config.cache.cache_type {
        CacheType::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            if !client.health_check().await? {
                anyhow::bail!("Redis health check failed");
            }
            info!("Using Redis session store");
            Arc::new(RedisSessionStore::new(client))
        }
        CacheType::Memory => {
            warn!("Using in-memory session store; sessions do not survive a restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    let (users, pool): (Arc<dyn UserRepository>, Option<DatabasePool>) =
        match config.database.url {
            Some(_) => {
                let pool = DatabasePool::new(&config.database).await?;
                pool.run_migrations().await?;
                info!("Using MySQL user directory");
                (
                    Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                    Some(pool),
                )
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory user directory");
                (Arc::new(InMemoryUserRepository::new()), None)
            }
        };

    let services = assemble(
        sessions,
        users,
        Arc::new(BcryptPasswordHasher::new()),
        &config.auth,
        config.cache.operation_timeout(),
    )?;

    Ok((services, pool))
}
