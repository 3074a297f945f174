//! Credential repository - login record persistence.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::credential;
use crate::domain::{Credential, NewCredential};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Credential persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn insert(&self, credential: NewCredential) -> AppResult<Credential>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>>;

    /// Overwrite the login email; returns affected rows
    async fn update_email(&self, id: Uuid, email: String) -> AppResult<u64>;

    /// Delete a credential; returns affected rows
    async fn delete(&self, id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`CredentialRepository`].
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialRepository for CredentialStore {
    async fn insert(&self, new_credential: NewCredential) -> AppResult<Credential> {
        let active_model = credential::ActiveModel {
            id: Set(new_credential.id),
            email: Set(new_credential.email),
            password_hash: Set(new_credential.password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Credential::from(model))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        let result = credential::Entity::find()
            .filter(credential::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Credential::from))
    }

    async fn update_email(&self, id: Uuid, email: String) -> AppResult<u64> {
        let result = credential::Entity::update_many()
            .col_expr(credential::Column::Email, Expr::value(email))
            .filter(credential::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = credential::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
