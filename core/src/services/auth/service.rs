//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};

use gk_shared::validation::validate_registration;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{NewUser, Role, User};
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenLifecycle;

/// Registration form
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Authentication service for registration, login and session management
pub struct AuthService<U, T, P>
where
    U: UserRepository + ?Sized,
    T: TokenLifecycle + ?Sized,
    P: PasswordHasher + ?Sized,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token lifecycle for issuing, rotating and revoking credentials
    tokens: Arc<T>,
    /// Password hashing
    password_hasher: Arc<P>,
}

impl<U, T, P> AuthService<U, T, P>
where
    U: UserRepository + ?Sized,
    T: TokenLifecycle + ?Sized,
    P: PasswordHasher + ?Sized,
{
    pub fn new(user_repository: Arc<U>, tokens: Arc<T>, password_hasher: Arc<P>) -> Self {
        Self {
            user_repository,
            tokens,
            password_hasher,
        }
    }

    /// Register a new account. New accounts always get the `user` role.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `DomainError::Validation` - Name, username or password rejected
    /// * `AuthError::UserAlreadyExists` - Username taken
    pub async fn register(&self, input: RegisterInput) -> DomainResult<User> {
        let username = input.username.trim().to_string();
        validate_registration(&input.name, &username, &input.password).map_err(|errors| {
            DomainError::Validation {
                message: errors.summary(),
            }
        })?;

        if self.user_repository.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(&input.password)?;
        let user = self
            .user_repository
            .create(NewUser {
                name: input.name.trim().to_string(),
                username,
                password_hash,
                role: Role::User,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Authenticate with username and password and start a new token chain
    ///
    /// An unknown username and a wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthSession> {
        let user = match self.user_repository.find_by_username(username.trim()).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.password_hasher.verify(&user.password_hash, password) {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.tokens.issue_pair(&user.identity()).await?;
        info!(user_id = user.id, "User logged in");
        Ok(AuthSession::new(user, tokens))
    }

    /// Exchange a refresh token for a new pair. The identity comes from the token.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.tokens.rotate(refresh_token).await
    }

    /// End the session behind a refresh token. Idempotent.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        self.tokens.revoke(refresh_token).await
    }

    pub async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    pub fn access_ttl_seconds(&self) -> i64 {
        self.tokens.access_ttl_seconds()
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.tokens.refresh_ttl_seconds()
    }
}
