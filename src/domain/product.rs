//! Product domain entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog product
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Current catalog price; orders snapshot it at creation time
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: Decimal,
}
