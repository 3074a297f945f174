//! Activity service - the read path over the append-only log.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::domain::ActivityLogEntry;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Activity log read operations trait for dependency injection.
#[async_trait]
pub trait ActivityService: Send + Sync {
    /// Read entries newest first, optionally filtered to one order
    async fn list_recent(
        &self,
        limit: Option<u64>,
        order_id: Option<Uuid>,
    ) -> AppResult<Vec<ActivityLogEntry>>;
}

/// Concrete implementation of [`ActivityService`] using Unit of Work.
pub struct ActivityReader<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ActivityReader<U> {
    /// Create new activity service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ActivityService for ActivityReader<U> {
    async fn list_recent(
        &self,
        limit: Option<u64>,
        order_id: Option<Uuid>,
    ) -> AppResult<Vec<ActivityLogEntry>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
        self.uow.activity().list_recent(limit, order_id).await
    }
}
