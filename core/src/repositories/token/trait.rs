//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// Tokens are stored and looked up by the SHA-256 digest of the token string;
/// the raw string never reaches the store. Rows are never deleted: a
/// consumed token stays behind as a revoked row.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token to the repository
    ///
    /// # Arguments
    /// * `token` - The RefreshToken entity to persist
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token hash)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Duration;
    /// # use uuid::Uuid;
    /// # use ta_core::repositories::TokenRepository;
    /// # use ta_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user_id = Uuid::new_v4();
    /// let token = RefreshToken::new(user_id, "hashed_token_value".to_string(), Duration::days(7));
    ///
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Arguments
    /// * `token_hash` - The hashed token value to search for
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found, in whatever state it is in
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Database error occurred
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a specific refresh token if it is not revoked already
    ///
    /// This is a compare-and-swap on `is_revoked`: of several concurrent
    /// callers, only one observes `true`.
    ///
    /// # Returns
    /// * `Ok(true)` - This call flipped the token to revoked
    /// * `Ok(false)` - Token not found or already revoked
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Atomically consume one token and store its replacement
    ///
    /// Revokes the row identified by `consumed_hash` only if it is still
    /// unrevoked and unexpired at `replacement.created_at`, and inserts
    /// `replacement` in the same unit of work. Either both happen or
    /// neither does.
    ///
    /// # Arguments
    /// * `consumed_hash` - Hash of the token presented by the client
    /// * `replacement` - Freshly generated token for the same user
    ///
    /// # Returns
    /// * `Ok(true)` - Rotation committed
    /// * `Ok(false)` - The consumed token was missing, expired or already
    ///   revoked (typically by a concurrent exchange); nothing was written
    /// * `Err(DomainError)` - Storage failure; nothing was written
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Duration;
    /// # use ta_core::repositories::TokenRepository;
    /// # use ta_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository, old: RefreshToken) -> Result<(), Box<dyn std::error::Error>> {
    /// let replacement = RefreshToken::new(old.user_id, "next_hash".to_string(), Duration::days(7));
    ///
    /// if !repo.rotate_refresh_token(&old.token_hash, replacement).await? {
    ///     println!("Token was already used");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn rotate_refresh_token(
        &self,
        consumed_hash: &str,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError>;
}
