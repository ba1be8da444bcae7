//! Main authentication service implementation

use std::sync::Arc;

use ta_shared::utils::{normalize_email, validators};
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, AuthenticatedUser, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service: sign-in flows, token refresh and the caller's profile
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User directory
    user_repository: Arc<U>,
    /// Token service for JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User directory
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Password sign-in
    ///
    /// Unknown email and wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        // Step 1: Resolve the account
        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Login rejected: unknown email");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        // Step 2: Check the password
        if !self.user_repository.verify_password(user.id, password).await? {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Step 3: Issue tokens with current roles
        let response = self.issue_for(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(response)
    }

    /// Create a password account and sign it in
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<AuthResponse> {
        // Step 1: Normalize and validate the email
        let email = normalize_email(email);
        if !validators::is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }

        // Step 2: Reject taken emails before judging the password
        if self.user_repository.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected: email already registered");
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        // Step 3: Enforce the password policy
        self.config.password_policy.check(password)?;

        // Step 4: Persist and sign in
        let user = User::new(email, clean_display_name(display_name));
        let user = self.user_repository.create(user, Some(password)).await?;
        info!(user_id = %user.id, "User registered");

        self.issue_for(&user).await
    }

    /// Exchange a refresh token for a new access/refresh pair
    ///
    /// The presented token is consumed: a second exchange of the same
    /// string fails, as does any exchange of a token that is unknown,
    /// expired, revoked, or whose owner no longer exists. All of these
    /// surface as `TokenError::InvalidRefreshToken`.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        // Step 1: The presented token must be active
        let consumed = self
            .token_service
            .find_active_refresh_token(refresh_token)
            .await?;

        // Step 2: The owner must still exist
        let user = match self.user_repository.find_by_id(consumed.user_id).await? {
            Some(user) => user,
            None => {
                warn!(user_id = %consumed.user_id, token_id = %consumed.id, "Refresh rejected: owner no longer exists");
                return Err(DomainError::Token(TokenError::InvalidRefreshToken));
            }
        };

        // Step 3: Re-read roles so changes apply from this refresh on
        let roles = self.user_repository.get_roles(user.id).await?;

        // Step 4: Mint the access token; nothing is consumed yet
        let access = self.token_service.create_access_token(&user, &roles)?;

        // Step 5: Consume the old token and store its replacement atomically
        let refresh_token = self.token_service.rotate_refresh_token(&consumed).await?;

        Ok(TokenPair::new(access, refresh_token).into())
    }

    /// Sign in with an email already verified by an external provider
    ///
    /// Creates a password-less account on first use.
    pub async fn external_login(
        &self,
        verified_email: Option<&str>,
        display_name: Option<&str>,
    ) -> DomainResult<AuthResponse> {
        // Step 1: The provider must have supplied an email
        let email = match verified_email.map(normalize_email) {
            Some(email) if !email.is_empty() => email,
            _ => return Err(DomainError::Auth(AuthError::ExternalEmailMissing)),
        };
        if !validators::is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }

        // Step 2: Find or create the account
        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let candidate = User::new(email.clone(), clean_display_name(display_name));
                match self.user_repository.create(candidate, None).await {
                    Ok(user) => {
                        info!(user_id = %user.id, "User created from external login");
                        user
                    }
                    // Lost a race with a concurrent first login for the same email
                    Err(DomainError::Auth(AuthError::EmailAlreadyRegistered)) => {
                        match self.user_repository.find_by_email(&email).await? {
                            Some(user) => user,
                            None => {
                                error!("External login: email reported taken but no account found");
                                return Err(DomainError::Internal {
                                    message: "user directory is inconsistent".to_string(),
                                });
                            }
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        // Step 3: Issue tokens
        self.issue_for(&user).await
    }

    /// Profile of the authenticated caller
    pub async fn current_user(&self, identity: &AuthenticatedUser) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(identity.user_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        let roles = self.user_repository.get_roles(user.id).await?;

        Ok(UserProfile {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            roles,
        })
    }

    async fn issue_for(&self, user: &User) -> DomainResult<AuthResponse> {
        let roles = self.user_repository.get_roles(user.id).await?;
        let pair = self.token_service.issue_token_pair(user, &roles).await?;
        Ok(pair.into())
    }
}

fn clean_display_name(display_name: Option<&str>) -> Option<String> {
    display_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
