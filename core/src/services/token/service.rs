//! Main token service implementation

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessToken, Claims, RefreshToken, RefreshTokenState, TokenPair, REFRESH_TOKEN_BYTES,
};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for minting access tokens and managing refresh tokens
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token store
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// The service, or `DomainError::Configuration` if the secret, issuer or
    /// audience is empty or a lifetime is outside its accepted range
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Mints a signed access token for `user` carrying `roles`
    ///
    /// Pure: nothing is persisted. The returned `expires_at` equals the
    /// `exp` claim.
    pub fn create_access_token(&self, user: &User, roles: &[String]) -> Result<AccessToken, DomainError> {
        let issued_at = Utc::now().timestamp();
        let expires = self
            .config
            .access_token_expiry_minutes
            .checked_mul(60)
            .and_then(|seconds| issued_at.checked_add(seconds))
            .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))?;
        let expires_at = Utc
            .timestamp_opt(expires, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))?;

        let subject = user.id.to_string();
        let claims = Claims {
            sub: subject.clone(),
            nameid: subject,
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            display_name: user.display_name_or_empty().to_string(),
            roles: roles.to_vec(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: expires,
            iat: issued_at,
            nbf: issued_at,
        };

        Ok(AccessToken {
            token: self.encode_jwt(&claims)?,
            expires_at,
        })
    }

    /// Generates an opaque refresh token: 64 CSPRNG bytes, standard base64
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }

    /// Hashes a token string for storage and lookup
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Mints an access token and a persisted refresh token for a fresh sign-in
    ///
    /// If the refresh token row cannot be stored the whole call fails and
    /// the access token is discarded.
    pub async fn issue_token_pair(&self, user: &User, roles: &[String]) -> Result<TokenPair, DomainError> {
        let access = self.create_access_token(user, roles)?;

        let refresh_token = Self::generate_refresh_token();
        let row = RefreshToken::new(
            user.id,
            Self::hash_token(&refresh_token),
            self.refresh_lifetime(),
        );
        let token_id = row.id;

        self.repository.save_refresh_token(row).await.map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to persist refresh token");
            e
        })?;

        info!(user_id = %user.id, token_id = %token_id, "Issued token pair");
        Ok(TokenPair::new(access, refresh_token))
    }

    /// Looks up the presented refresh token and requires it to be active
    ///
    /// Missing, expired and revoked tokens all fail with the same
    /// `TokenError::InvalidRefreshToken`; the reason is only logged.
    pub async fn find_active_refresh_token(&self, presented: &str) -> Result<RefreshToken, DomainError> {
        let token_hash = Self::hash_token(presented);

        let token = match self.repository.find_refresh_token(&token_hash).await? {
            Some(token) => token,
            None => {
                debug!("Refresh rejected: token not found");
                return Err(DomainError::Token(TokenError::InvalidRefreshToken));
            }
        };

        match token.state_at(Utc::now()) {
            RefreshTokenState::Active => Ok(token),
            RefreshTokenState::Revoked => {
                debug!(token_id = %token.id, user_id = %token.user_id, "Refresh rejected: token revoked");
                Err(DomainError::Token(TokenError::InvalidRefreshToken))
            }
            RefreshTokenState::Expired => {
                debug!(token_id = %token.id, user_id = %token.user_id, "Refresh rejected: token expired");
                Err(DomainError::Token(TokenError::InvalidRefreshToken))
            }
        }
    }

    /// Consumes `consumed` and returns its replacement token string
    ///
    /// Revocation of the old row and insertion of the new one happen
    /// atomically in the store. Losing a race against another exchange of
    /// the same token yields `TokenError::InvalidRefreshToken`.
    pub async fn rotate_refresh_token(&self, consumed: &RefreshToken) -> Result<String, DomainError> {
        let refresh_token = Self::generate_refresh_token();
        let replacement = RefreshToken::new(
            consumed.user_id,
            Self::hash_token(&refresh_token),
            self.refresh_lifetime(),
        );
        let replacement_id = replacement.id;

        let rotated = self
            .repository
            .rotate_refresh_token(&consumed.token_hash, replacement)
            .await?;

        if !rotated {
            debug!(token_id = %consumed.id, user_id = %consumed.user_id, "Refresh rejected: token already consumed");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        info!(
            user_id = %consumed.user_id,
            old_token_id = %consumed.id,
            new_token_id = %replacement_id,
            "Refresh token rotated"
        );
        Ok(refresh_token)
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience and validity window check out
    /// * `Err(TokenError::TokenExpired)` - Past `exp`
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn refresh_lifetime(&self) -> Duration {
        Duration::days(self.config.refresh_token_expiry_days)
    }
}
