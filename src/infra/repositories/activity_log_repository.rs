//! Activity log repository.
//!
//! The trait exposes only `insert` and `list_recent`; entries are never
//! updated or deleted.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::activity_log;
use crate::domain::{ActivityLogEntry, NewLogEntry};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Append-only activity log operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Append one entry
    async fn insert(&self, entry: NewLogEntry) -> AppResult<ActivityLogEntry>;

    /// Read entries newest first, optionally filtered to one order
    async fn list_recent(
        &self,
        limit: u64,
        order_id: Option<Uuid>,
    ) -> AppResult<Vec<ActivityLogEntry>>;
}

/// SeaORM-backed implementation of [`ActivityLogRepository`].
pub struct ActivityLogStore {
    db: DatabaseConnection,
}

impl ActivityLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityLogRepository for ActivityLogStore {
    async fn insert(&self, entry: NewLogEntry) -> AppResult<ActivityLogEntry> {
        let active_model = activity_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            actor_id: Set(entry.actor_id),
            action: Set(entry.action),
            description: Set(entry.description),
            order_id: Set(entry.order_id),
            order_ref: Set(entry.order_ref),
            customer_ref: Set(entry.customer_ref),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ActivityLogEntry::from(model))
    }

    async fn list_recent(
        &self,
        limit: u64,
        order_id: Option<Uuid>,
    ) -> AppResult<Vec<ActivityLogEntry>> {
        let mut query = activity_log::Entity::find()
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit);

        if let Some(order_id) = order_id {
            query = query.filter(activity_log::Column::OrderId.eq(order_id));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(ActivityLogEntry::from).collect())
    }
}
