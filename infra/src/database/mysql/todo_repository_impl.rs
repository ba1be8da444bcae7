//! MySQL implementation of the TodoRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ta_core::domain::entities::todo::{NewTodo, TodoItem, UpdateTodo};
use ta_core::errors::DomainError;
use ta_core::repositories::TodoRepository;

use super::db_error;

pub struct MySqlTodoRepository {
    pool: MySqlPool,
}

impl MySqlTodoRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &sqlx::mysql::MySqlRow) -> Result<TodoItem, DomainError> {
        let owner_id: String = row.try_get("owner_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get owner_id: {}", e) })?;

        Ok(TodoItem {
            id: row.try_get("id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?,
            title: row.try_get("title")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get title: {}", e) })?,
            is_completed: row.try_get("is_completed")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_completed: {}", e) })?,
            owner_id: Uuid::parse_str(&owner_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid owner UUID: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl TodoRepository for MySqlTodoRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<TodoItem>, DomainError> {
        let query = r#"
            SELECT id, title, is_completed, owner_id, created_at
            FROM todo_items
            WHERE owner_id = ?
            ORDER BY id
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list todos", e))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn find_by_id(&self, id: i64, owner_id: Uuid) -> Result<Option<TodoItem>, DomainError> {
        let query = r#"
            SELECT id, title, is_completed, owner_id, created_at
            FROM todo_items
            WHERE id = ? AND owner_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find todo", e))?;

        result.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn create(&self, owner_id: Uuid, todo: NewTodo) -> Result<TodoItem, DomainError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO todo_items (title, is_completed, owner_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&todo.title)
        .bind(todo.is_completed)
        .bind(owner_id.to_string())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create todo", e))?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| DomainError::Internal {
            message: "Todo id out of range".to_string(),
        })?;

        Ok(TodoItem {
            id,
            title: todo.title,
            is_completed: todo.is_completed,
            owner_id,
            created_at,
        })
    }

    async fn update(&self, id: i64, owner_id: Uuid, todo: UpdateTodo) -> Result<bool, DomainError> {
        // rows_affected() is zero for an unchanged row, so ownership is checked first
        if self.find_by_id(id, owner_id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE todo_items SET title = ?, is_completed = ? WHERE id = ? AND owner_id = ?")
            .bind(&todo.title)
            .bind(todo.is_completed)
            .bind(id)
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update todo", e))?;

        Ok(true)
    }

    async fn delete(&self, id: i64, owner_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete todo", e))?;

        Ok(result.rows_affected() > 0)
    }
}
