//! User domain entities and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER, VALID_ROLES};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Strict parse for incoming role values.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::User),
            other => Err(AppError::validation(format!(
                "Invalid role '{}' (allowed: {})",
                other,
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// Lenient conversion for stored values: unknown roles read as `user`.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// The resolved caller of an operation.
///
/// Passed explicitly into every service call so operations can be
/// exercised with fabricated identities; the caller's role is never
/// carried here but re-read from the user directory per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
}

impl Identity {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// User profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Login credential record, paired with a profile by id.
///
/// Models the identity-provider side of an account; profile writes that
/// fail after the credential exists are compensated by deleting it again.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new credential record
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Data for inserting a new profile record
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Fields accepted when an admin creates an account
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Fields accepted when an admin updates an account
#[derive(Debug, Clone)]
pub struct UpdateUserInput {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User role
    #[schema(example = "user")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}
