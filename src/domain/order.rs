//! Order domain entity and the order status domain.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Order status enumeration.
///
/// Any status may move to any other status; there is deliberately no
/// transition graph and no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Created,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every allowed status value.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Created,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Strict parse for incoming status values, echoing the allowed set.
    pub fn parse(s: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                AppError::validation(format!(
                    "Invalid status '{}' (allowed: {})",
                    s,
                    allowed.join(", ")
                ))
            })
    }
}

/// Lenient conversion for stored values: unknown statuses read as `CREATED`.
impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .unwrap_or(OrderStatus::Created)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub quantity: i32,
    /// Unit price captured from the catalog at creation time; later
    /// catalog changes never touch it.
    pub unit_price: Decimal,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The order total is always derived, never stored.
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Data for inserting a new order row
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub delivery_address: String,
    pub status: OrderStatus,
}

/// Validated input for creating an order
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub delivery_address: String,
    /// Admin only: attribute the order to this customer instead of the caller
    pub customer_id: Option<Uuid>,
}

/// Pre-mutation state of an order, captured before a status change or
/// delete so the activity log can reference data that the mutation
/// overwrites or removes.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub id: Uuid,
    pub status: OrderStatus,
    pub quantity: i32,
    pub customer_id: Uuid,
    pub customer_name: Option<String>,
}

/// Flattened order row handed to table components.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderRow {
    pub id: Uuid,
    /// Product name at read time
    pub product: String,
    /// Customer display name at read time
    pub customer: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Computed `quantity * unit_price`
    pub total: Decimal,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
