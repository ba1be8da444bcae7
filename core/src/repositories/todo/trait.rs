//! Todo repository trait. Every query is scoped to an owner.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::errors::DomainError;

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos owned by `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<TodoItem>, DomainError>;

    /// A todo by ID, only if `owner_id` owns it
    async fn find_by_id(&self, id: i64, owner_id: Uuid) -> Result<Option<TodoItem>, DomainError>;

    /// Insert a todo for `owner_id`; the store assigns the ID
    async fn create(&self, owner_id: Uuid, todo: NewTodo) -> Result<TodoItem, DomainError>;

    /// Replace title and completion flag
    ///
    /// # Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - No such todo for this owner
    async fn update(&self, id: i64, owner_id: Uuid, todo: UpdateTodo) -> Result<bool, DomainError>;

    /// Delete a todo
    ///
    /// # Returns
    /// * `Ok(true)` - Row deleted
    /// * `Ok(false)` - No such todo for this owner
    async fn delete(&self, id: i64, owner_id: Uuid) -> Result<bool, DomainError>;
}
