//! In-memory user directory for development and tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gk_core::domain::entities::user::{NewUser, User};
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::UserRepository;

#[derive(Default)]
struct Directory {
    next_id: i64,
    users: HashMap<i64, User>,
}

/// User repository held in process memory; ids are assigned sequentially from 1
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    directory: Arc<RwLock<Directory>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        Ok(directory
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.directory.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut directory = self.directory.write().await;
        if directory.users.values().any(|u| u.username == user.username) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        directory.next_id += 1;
        let now = Utc::now();
        let created = User {
            id: directory.next_id,
            name: user.name,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        directory.users.insert(created.id, created.clone());
        Ok(created)
    }
}
