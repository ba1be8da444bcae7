//! In-memory implementation of UserRepository for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password: Option<String>,
    roles: Vec<String>,
}

/// Mock user directory. Passwords are kept as given; this is a test double.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role to an existing user; unknown users are ignored
    pub async fn assign_role(&self, user_id: Uuid, role: &str) {
        let mut users = self.users.write().await;
        if let Some(stored) = users.get_mut(&user_id) {
            if !stored.roles.iter().any(|r| r == role) {
                stored.roles.push(role.to_string());
            }
        }
    }

    /// Remove a role from a user
    pub async fn remove_role(&self, user_id: Uuid, role: &str) {
        let mut users = self.users.write().await;
        if let Some(stored) = users.get_mut(&user_id) {
            stored.roles.retain(|r| r != role);
        }
    }

    /// Delete a user outright
    pub async fn remove(&self, user_id: Uuid) {
        self.users.write().await.remove(&user_id);
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|s| s.user.email == email)
            .map(|s| s.user.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|s| s.user.clone()))
    }

    async fn create(&self, user: User, password: Option<&str>) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|s| s.user.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password: password.map(str::to_string),
                roles: Vec::new(),
            },
        );
        Ok(user)
    }

    async fn verify_password(&self, user_id: Uuid, password: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(&user_id)
            .and_then(|s| s.password.as_deref())
            .map(|stored| stored == password)
            .unwrap_or(false))
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(&user_id)
            .map(|s| s.roles.clone())
            .unwrap_or_default())
    }
}
