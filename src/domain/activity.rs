//! Activity log domain types.
//!
//! Entries are append-only: nothing in the codebase updates or deletes
//! them. Order and customer references are denormalized display strings
//! captured at write time so an entry stays meaningful after the rows it
//! points at are gone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Action tag for order creation
pub const ACTION_CREATED: &str = "CREATED";

/// Action tag for status transitions
pub const ACTION_STATUS_CHANGED: &str = "STATUS_CHANGED";

/// Action tag for order deletion
pub const ACTION_DELETED: &str = "DELETED";

/// Display fallback when no customer name could be resolved
pub const NO_CUSTOMER_REF: &str = "(no customer)";

/// A single activity log entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    /// The user who performed the action
    pub actor_id: Uuid,
    /// Short action tag, e.g. `CREATED`, `STATUS_CHANGED`, `DELETED`
    pub action: String,
    pub description: String,
    /// Live order reference; null once the order is deleted or from the start
    pub order_id: Option<Uuid>,
    /// Denormalized order reference that survives deletion
    pub order_ref: Option<String>,
    /// Denormalized customer name that survives deletion
    pub customer_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for appending a new log entry
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub actor_id: Uuid,
    pub action: String,
    pub description: String,
    pub order_id: Option<Uuid>,
    pub order_ref: Option<String>,
    pub customer_ref: Option<String>,
}
