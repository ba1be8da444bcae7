//! MySQL implementation of the UserRepository trait.
//!
//! Accounts live in `users`; role membership in `user_roles`. Passwords are
//! stored as bcrypt hashes and never leave this module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ta_core::domain::entities::user::User;
use ta_core::errors::{AuthError, DomainError};
use ta_core::repositories::UserRepository;

use super::{db_error, is_unique_violation};
use crate::security::PasswordHasher;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
    hasher: PasswordHasher,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_hasher(pool, PasswordHasher::default())
    }

    pub fn with_hasher(pool: MySqlPool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    /// Grant `role` to a user; granting twice is a no-op
    pub async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), DomainError> {
        sqlx::query("INSERT IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
            .bind(user_id.to_string())
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to assign role", e))?;
        Ok(())
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            email: row.try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            display_name: row.try_get("display_name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get display_name: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, display_name, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by email", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, display_name, created_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by id", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User, password: Option<&str>) -> Result<User, DomainError> {
        let password_hash = match password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let query = r#"
            INSERT INTO users (id, email, display_name, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        // The unique key on email settles concurrent registrations
        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                } else {
                    db_error("Failed to create user", e)
                }
            })?;

        Ok(user)
    }

    async fn verify_password(&self, user_id: Uuid, password: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT password_hash FROM users WHERE id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load password hash", e))?;

        let stored: Option<String> = match row {
            Some(row) => row.try_get("password_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get password_hash: {}", e) })?,
            None => None,
        };

        match stored {
            Some(hash) => self.hasher.verify(password, &hash).await,
            // External-only account
            None => Ok(false),
        }
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load roles", e))?;

        rows.iter()
            .map(|row| {
                row.try_get("role")
                    .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })
            })
            .collect()
    }
}
