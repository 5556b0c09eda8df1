//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first; implementations live in the infrastructure layer
//! (MySQL via sqlx, and an in-memory directory for development).

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example
/// ```no_run
/// # use gk_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_username("ada").await? {
///     Some(user) => println!("User found: {}", user.id),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique username
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its assigned id and timestamps
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username taken
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}

#[async_trait]
impl<R: UserRepository + ?Sized> UserRepository for Arc<R> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        (**self).find_by_username(username).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        (**self).create(user).await
    }
}
