//! User service - directory and role management.
//!
//! Every mutation here is admin-gated and guarded against
//! self-modification: an admin can never change their own role or
//! delete their own account.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::gate;
use crate::config::MIN_NAME_LENGTH;
use crate::domain::{
    CreateUserInput, Identity, NewCredential, NewProfile, Password, UpdateUserInput, User, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User directory operations trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user profile by id
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all user profiles (admin only)
    async fn list_users(&self, caller: &Identity) -> AppResult<Vec<User>>;

    /// Create a credential/profile pair (admin only)
    async fn create_user(&self, caller: &Identity, input: CreateUserInput) -> AppResult<Uuid>;

    /// Update another account's profile and login email (admin only)
    async fn update_user(
        &self,
        caller: &Identity,
        target_id: Uuid,
        input: UpdateUserInput,
    ) -> AppResult<()>;

    /// Delete another account (admin only)
    async fn delete_user(&self, caller: &Identity, target_id: Uuid) -> AppResult<()>;

    /// Change another account's role (admin only, never your own)
    async fn change_role(&self, caller: &Identity, target_id: Uuid, role: &str) -> AppResult<()>;
}

/// Concrete implementation of [`UserService`] using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if (trimmed.len() as u64) < MIN_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Name must be at least {} characters",
            MIN_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_email(email: &str) -> AppResult<String> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(normalized)
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("User")
    }

    async fn list_users(&self, caller: &Identity) -> AppResult<Vec<User>> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;
        self.uow.users().list().await
    }

    async fn create_user(&self, caller: &Identity, input: CreateUserInput) -> AppResult<Uuid> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        let name = validate_name(&input.name)?;
        let email = validate_email(&input.email)?;
        let role = UserRole::parse(&input.role)?;

        if self
            .uow
            .credentials()
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let id = Uuid::new_v4();

        self.uow
            .credentials()
            .insert(NewCredential {
                id,
                email: email.clone(),
                password_hash,
            })
            .await?;

        if let Err(e) = self
            .uow
            .users()
            .insert(NewProfile {
                id,
                name,
                email,
                role,
            })
            .await
        {
            // Compensate: the login must not exist without a profile.
            if let Err(rollback) = self.uow.credentials().delete(id).await {
                tracing::error!(user_id = %id, "credential rollback failed: {rollback}");
            }
            return Err(e);
        }

        Ok(id)
    }

    async fn update_user(
        &self,
        caller: &Identity,
        target_id: Uuid,
        input: UpdateUserInput,
    ) -> AppResult<()> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        if caller.id == target_id {
            return Err(AppError::forbidden("You cannot edit your own account here"));
        }

        let name = validate_name(&input.name)?;
        let email = validate_email(&input.email)?;
        let role = input.role.as_deref().map(UserRole::parse).transpose()?;

        let rows = self
            .uow
            .credentials()
            .update_email(target_id, email.clone())
            .await?;
        if rows == 0 {
            return Err(AppError::NotFound("User"));
        }

        let rows = self
            .uow
            .users()
            .update_profile(target_id, name, email, role)
            .await?;
        if rows == 0 {
            return Err(AppError::NotFound("User"));
        }

        Ok(())
    }

    async fn delete_user(&self, caller: &Identity, target_id: Uuid) -> AppResult<()> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        if caller.id == target_id {
            return Err(AppError::forbidden("You cannot delete your own account"));
        }

        let rows = self.uow.credentials().delete(target_id).await?;
        if rows == 0 {
            return Err(AppError::NotFound("User"));
        }

        // A missing profile is tolerated here; the login is gone.
        self.uow.users().delete(target_id).await?;

        Ok(())
    }

    async fn change_role(&self, caller: &Identity, target_id: Uuid, role: &str) -> AppResult<()> {
        // The self-guard comes before the admin gate: even an admin is
        // told "no" rather than "not allowed to administrate".
        if caller.id == target_id {
            return Err(AppError::forbidden("You cannot change your own role"));
        }

        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        let role = UserRole::parse(role)?;

        let rows = self.uow.users().update_role(target_id, role).await?;
        if rows == 0 {
            return Err(AppError::NotFound("User"));
        }

        Ok(())
    }
}
