//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    fail: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a database error
    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "mock database failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.check()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.check()?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.check()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let now = Utc::now();
        let created = User {
            id: users.keys().max().copied().unwrap_or(0) + 1,
            name: user.name,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }
}
