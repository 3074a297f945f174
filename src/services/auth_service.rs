//! Authentication service - registration, login, and token handling.
//!
//! Accounts are a credential/profile pair sharing one id. The
//! credential is written first; if the profile write fails the
//! credential is deleted again so no orphaned login remains.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewCredential, NewProfile, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for an authenticated account
fn generate_token(id: Uuid, email: &str, role: UserRole, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: id,
        email: email.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of [`AuthService`] using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User> {
        let email = email.trim().to_lowercase();

        if self
            .uow
            .credentials()
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let id = Uuid::new_v4();

        self.uow
            .credentials()
            .insert(NewCredential {
                id,
                email: email.clone(),
                password_hash,
            })
            .await?;

        match self
            .uow
            .users()
            .insert(NewProfile {
                id,
                name,
                email,
                role: UserRole::User,
            })
            .await
        {
            Ok(user) => Ok(user),
            Err(e) => {
                // Compensate: the login must not exist without a profile.
                if let Err(rollback) = self.uow.credentials().delete(id).await {
                    tracing::error!(user_id = %id, "credential rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = email.trim().to_lowercase();
        let credential = self.uow.credentials().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the account
        // doesn't exist to prevent timing attacks that could enumerate
        // valid emails. We use a dummy hash that always fails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, account_exists) = match &credential {
            Some(c) => (c.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        if !account_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified account_exists is true
        let credential = credential.unwrap();

        // The role lives on the profile; a missing profile falls back
        // to the default role rather than blocking the login.
        let role = self
            .uow
            .users()
            .find_by_id(credential.id)
            .await
            .ok()
            .flatten()
            .map(|u| u.role)
            .unwrap_or(UserRole::User);

        generate_token(credential.id, &credential.email, role, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
