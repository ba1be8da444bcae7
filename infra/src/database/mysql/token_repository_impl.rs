//! MySQL implementation of the TokenRepository trait.
//!
//! Rows are keyed by the SHA-256 hex digest of the token string; the raw
//! token never reaches the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ta_core::domain::entities::token::RefreshToken;
use ta_core::errors::DomainError;
use ta_core::repositories::TokenRepository;

use super::{db_error, is_unique_violation};

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens (
        id, user_id, token_hash, created_at, expires_at, is_revoked
    ) VALUES (?, ?, ?, ?, ?, ?)
"#;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row.try_get("user_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid token UUID: {}", e) })?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            token_hash: row.try_get("token_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get token_hash: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get expires_at: {}", e) })?,
            is_revoked: row.try_get("is_revoked")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_revoked: {}", e) })?,
        })
    }

    fn insert_error(e: sqlx::Error) -> DomainError {
        if is_unique_violation(&e) {
            DomainError::Validation { message: "Token already exists".to_string() }
        } else {
            db_error("Failed to save refresh token", e)
        }
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        sqlx::query(INSERT_TOKEN)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(Self::insert_error)?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find refresh token", e))?;

        result.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn rotate_refresh_token(
        &self,
        consumed_hash: &str,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin rotation", e))?;

        // Only an active row may be consumed; the row lock serializes racers
        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE AND expires_at > ?
            "#,
        )
        .bind(consumed_hash)
        .bind(replacement.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to revoke consumed token", e))?;

        if revoked.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back rotation", e))?;
            return Ok(false);
        }

        sqlx::query(INSERT_TOKEN)
            .bind(replacement.id.to_string())
            .bind(replacement.user_id.to_string())
            .bind(&replacement.token_hash)
            .bind(replacement.created_at)
            .bind(replacement.expires_at)
            .bind(replacement.is_revoked)
            .execute(&mut *tx)
            .await
            .map_err(Self::insert_error)?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit rotation", e))?;

        Ok(true)
    }
}
