//! In-memory implementation of TodoRepository for tests

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::errors::DomainError;

use super::r#trait::TodoRepository;

#[derive(Default)]
struct Table {
    rows: Vec<TodoItem>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct MockTodoRepository {
    table: Arc<RwLock<Table>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<TodoItem>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64, owner_id: Uuid) -> Result<Option<TodoItem>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .cloned())
    }

    async fn create(&self, owner_id: Uuid, todo: NewTodo) -> Result<TodoItem, DomainError> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let item = TodoItem {
            id: table.next_id,
            title: todo.title,
            is_completed: todo.is_completed,
            owner_id,
            created_at: Utc::now(),
        };
        table.rows.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, owner_id: Uuid, todo: UpdateTodo) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        match table
            .rows
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
        {
            Some(existing) => {
                existing.title = todo.title;
                existing.is_completed = todo.is_completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64, owner_id: Uuid) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|t| !(t.id == id && t.owner_id == owner_id));
        Ok(table.rows.len() != before)
    }
}
