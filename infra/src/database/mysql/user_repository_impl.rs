//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use gk_core::domain::entities::user::{NewUser, Role, User};
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, name, username, password, role, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role: String = row.try_get("role").map_err(column_error("role"))?;

        Ok(User {
            id: row.try_get("id").map_err(column_error("id"))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            username: row.try_get("username").map_err(column_error("username"))?,
            password_hash: row.try_get("password").map_err(column_error("password"))?,
            role: role.parse::<Role>().map_err(|message| DomainError::Database { message })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE username = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (name, username, password, role)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                _ => DomainError::Database {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id).await?.ok_or_else(|| DomainError::Database {
            message: format!("User {} missing after insert", id),
        })
    }
}
