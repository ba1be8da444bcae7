//! User directory trait: accounts, credentials and role membership.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for user accounts
///
/// Implementations own password storage. Callers hand over a plaintext
/// password on `create` and ask `verify_password` for a yes/no answer;
/// hashes never cross this boundary.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - The user to persist; `email` must already be normalized
    /// * `password` - Plaintext password, or `None` for externally
    ///   authenticated accounts that cannot log in with a password
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken
    /// * `Err(DomainError)` - Database error occurred
    async fn create(&self, user: User, password: Option<&str>) -> Result<User, DomainError>;

    /// Check a plaintext password against the stored one
    ///
    /// Returns `Ok(false)` for unknown users and for accounts without a
    /// password.
    async fn verify_password(&self, user_id: Uuid, password: &str) -> Result<bool, DomainError>;

    /// Current role names for a user, empty if none
    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, DomainError>;
}
