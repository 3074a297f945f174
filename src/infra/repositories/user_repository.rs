//! User repository - profile persistence.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user;
use crate::domain::{NewProfile, User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User profile persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List profiles ordered by name
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn insert(&self, profile: NewProfile) -> AppResult<User>;

    /// Overwrite name, email, and optionally the role; returns affected rows
    async fn update_profile(
        &self,
        id: Uuid,
        name: String,
        email: String,
        role: Option<UserRole>,
    ) -> AppResult<u64>;

    /// Overwrite only the role; returns affected rows
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<u64>;

    /// Delete a profile; returns affected rows
    async fn delete(&self, id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn insert(&self, profile: NewProfile) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            id: Set(profile.id),
            name: Set(profile.name),
            email: Set(profile.email),
            role: Set(profile.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: String,
        email: String,
        role: Option<UserRole>,
    ) -> AppResult<u64> {
        let mut query = user::Entity::update_many()
            .col_expr(user::Column::Name, Expr::value(name))
            .col_expr(user::Column::Email, Expr::value(email))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()));

        if let Some(role) = role {
            query = query.col_expr(user::Column::Role, Expr::value(role.to_string()));
        }

        let result = query
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<u64> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Role, Expr::value(role.to_string()))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
