//! Order service - the order lifecycle and its audit side effect.
//!
//! Every mutation resolves the caller's role first, validates input,
//! touches the order store, and finally appends to the activity log.
//! The log append is a best-effort side effect: once the primary write
//! has committed, a failed append is recorded internally and never
//! surfaced to the caller.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::gate;
use crate::config::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MIN_ADDRESS_LENGTH};
use crate::domain::activity::{
    ACTION_CREATED, ACTION_DELETED, ACTION_STATUS_CHANGED, NO_CUSTOMER_REF,
};
use crate::domain::{CreateOrderInput, Identity, NewLogEntry, NewOrder, OrderRow, OrderStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Order operations trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order, snapshotting the product's current price.
    /// Admins may attribute the order to another (non-admin) customer.
    async fn create_order(&self, caller: &Identity, input: CreateOrderInput) -> AppResult<Uuid>;

    /// Overwrite quantity and delivery address (owner or admin).
    /// Deliberately writes no activity entry.
    async fn update_details(
        &self,
        caller: &Identity,
        order_id: Uuid,
        quantity: i32,
        address: &str,
    ) -> AppResult<()>;

    /// Move an order to any status in the domain (admin only).
    async fn change_status(&self, caller: &Identity, order_id: Uuid, status: &str)
        -> AppResult<()>;

    /// Hard-delete an order (owner or admin), logging its final state first.
    async fn delete_order(&self, caller: &Identity, order_id: Uuid) -> AppResult<()>;

    /// Read one flattened order row (admins see every order, users their own).
    async fn get_order(&self, caller: &Identity, order_id: Uuid) -> AppResult<OrderRow>;

    /// List flattened order rows, newest first.
    async fn list_orders(&self, caller: &Identity, limit: Option<u64>) -> AppResult<Vec<OrderRow>>;
}

/// Concrete implementation of [`OrderService`] using Unit of Work.
pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    /// Create new order service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Append to the activity log, swallowing failures: the primary
    /// mutation has already committed and must still report success.
    async fn record_activity(&self, entry: NewLogEntry) {
        if let Err(e) = self.uow.activity().insert(entry).await {
            tracing::warn!("activity log append failed: {e}");
        }
    }
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

fn validate_address(address: &str) -> AppResult<String> {
    let trimmed = address.trim();
    if (trimmed.len() as u64) < MIN_ADDRESS_LENGTH {
        return Err(AppError::validation(format!(
            "Delivery address must be at least {} characters",
            MIN_ADDRESS_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn create_order(&self, caller: &Identity, input: CreateOrderInput) -> AppResult<Uuid> {
        validate_quantity(input.quantity)?;
        let address = validate_address(&input.delivery_address)?;

        let product = self
            .uow
            .products()
            .find_by_id(input.product_id)
            .await?
            .ok_or_not_found("Product")?;

        if product.unit_price.is_sign_negative() {
            return Err(AppError::validation("Invalid product price"));
        }

        // Resolve the customer the order is attributed to. Only admins
        // may pick one, and an admin account can never be a customer.
        let (customer_id, customer_name) = match input.customer_id {
            Some(target_id) => {
                if !gate::is_admin(self.uow.users().as_ref(), caller).await {
                    return Err(AppError::forbidden("Only an admin can choose the customer"));
                }

                let target = self
                    .uow
                    .users()
                    .find_by_id(target_id)
                    .await?
                    .ok_or_not_found("Customer")?;

                if target.is_admin() {
                    return Err(AppError::forbidden("An admin account cannot be the customer"));
                }

                (target.id, Some(target.name))
            }
            None => {
                // Name lookup is best-effort; the order is attributed
                // to the caller either way.
                let me = self.uow.users().find_by_id(caller.id).await.ok().flatten();
                (caller.id, me.map(|u| u.name))
            }
        };

        let order = self
            .uow
            .orders()
            .insert(NewOrder {
                product_id: product.id,
                customer_id,
                quantity: input.quantity,
                unit_price: product.unit_price,
                delivery_address: address,
                status: OrderStatus::Created,
            })
            .await?;

        self.record_activity(NewLogEntry {
            actor_id: caller.id,
            action: ACTION_CREATED.to_string(),
            description: "Order created".to_string(),
            order_id: Some(order.id),
            order_ref: Some(order.id.to_string()),
            customer_ref: Some(customer_name.unwrap_or_else(|| NO_CUSTOMER_REF.to_string())),
        })
        .await;

        Ok(order.id)
    }

    async fn update_details(
        &self,
        caller: &Identity,
        order_id: Uuid,
        quantity: i32,
        address: &str,
    ) -> AppResult<()> {
        validate_quantity(quantity)?;
        let address = validate_address(address)?;

        // Non-admins can only touch their own rows; the filter is part
        // of the UPDATE itself.
        let owner = if gate::is_admin(self.uow.users().as_ref(), caller).await {
            None
        } else {
            Some(caller.id)
        };

        let rows = self
            .uow
            .orders()
            .update_details(order_id, quantity, address, owner)
            .await?;

        if rows == 0 {
            return Err(AppError::NotFound("Order"));
        }

        // Detail edits are not logged.
        Ok(())
    }

    async fn change_status(
        &self,
        caller: &Identity,
        order_id: Uuid,
        status: &str,
    ) -> AppResult<()> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        let new_status = OrderStatus::parse(status)?;

        // The old status and customer name must be read before the
        // update; the log entry consumes this snapshot.
        let snapshot = self
            .uow
            .orders()
            .find_snapshot(order_id)
            .await?
            .ok_or_not_found("Order")?;

        let rows = self.uow.orders().update_status(order_id, new_status).await?;
        if rows == 0 {
            return Err(AppError::NotFound("Order"));
        }

        self.record_activity(NewLogEntry {
            actor_id: caller.id,
            action: ACTION_STATUS_CHANGED.to_string(),
            description: format!("Status changed: {} → {}", snapshot.status, new_status),
            order_id: Some(order_id),
            order_ref: Some(order_id.to_string()),
            customer_ref: Some(
                snapshot
                    .customer_name
                    .unwrap_or_else(|| NO_CUSTOMER_REF.to_string()),
            ),
        })
        .await;

        Ok(())
    }

    async fn delete_order(&self, caller: &Identity, order_id: Uuid) -> AppResult<()> {
        let admin = gate::is_admin(self.uow.users().as_ref(), caller).await;

        let snapshot = self
            .uow
            .orders()
            .find_snapshot(order_id)
            .await?
            .ok_or_not_found("Order")?;

        // Rejecting here keeps rejected deletes out of the log.
        if !admin && snapshot.customer_id != caller.id {
            return Err(AppError::forbidden("You can only delete your own orders"));
        }

        // The entry needs data that disappears with the row, so it is
        // written before the delete.
        self.record_activity(NewLogEntry {
            actor_id: caller.id,
            action: ACTION_DELETED.to_string(),
            description: format!(
                "Order deleted (status: {}, quantity: {})",
                snapshot.status, snapshot.quantity
            ),
            order_id: Some(order_id),
            order_ref: Some(order_id.to_string()),
            customer_ref: Some(
                snapshot
                    .customer_name
                    .unwrap_or_else(|| NO_CUSTOMER_REF.to_string()),
            ),
        })
        .await;

        let owner = if admin { None } else { Some(caller.id) };
        let rows = self.uow.orders().delete(order_id, owner).await?;
        if rows == 0 {
            return Err(AppError::NotFound("Order"));
        }

        Ok(())
    }

    async fn get_order(&self, caller: &Identity, order_id: Uuid) -> AppResult<OrderRow> {
        let owner = if gate::is_admin(self.uow.users().as_ref(), caller).await {
            None
        } else {
            Some(caller.id)
        };

        self.uow
            .orders()
            .find_row(order_id, owner)
            .await?
            .ok_or_not_found("Order")
    }

    async fn list_orders(&self, caller: &Identity, limit: Option<u64>) -> AppResult<Vec<OrderRow>> {
        let owner = if gate::is_admin(self.uow.users().as_ref(), caller).await {
            None
        } else {
            Some(caller.id)
        };

        self.uow.orders().list(clamp_limit(limit), owner).await
    }
}
