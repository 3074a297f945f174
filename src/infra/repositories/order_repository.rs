//! Order repository - persistence for the order state machine.
//!
//! Ownership guards are part of the mutating queries themselves: when an
//! `owner` filter is supplied, the UPDATE/DELETE is constrained to rows
//! owned by that user, so ownership cannot change between a check and
//! the write.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use super::entities::{order, product, user};
use crate::domain::{NewOrder, Order, OrderRow, OrderSnapshot, OrderStatus};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Order persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order row
    async fn insert(&self, order: NewOrder) -> AppResult<Order>;

    /// Read the pre-mutation state of an order (status, quantity,
    /// owner, customer display name)
    async fn find_snapshot(&self, id: Uuid) -> AppResult<Option<OrderSnapshot>>;

    /// Read one flattened order row; with an `owner` filter only rows
    /// owned by that user resolve
    async fn find_row(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<Option<OrderRow>>;

    /// List flattened order rows, newest first
    async fn list(&self, limit: u64, owner: Option<Uuid>) -> AppResult<Vec<OrderRow>>;

    /// Overwrite quantity and delivery address; returns affected rows
    async fn update_details(
        &self,
        id: Uuid,
        quantity: i32,
        address: String,
        owner: Option<Uuid>,
    ) -> AppResult<u64>;

    /// Overwrite the status; returns affected rows
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<u64>;

    /// Hard-delete an order; returns affected rows
    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<u64>;

    /// Count orders referencing a product (referential delete guard)
    async fn count_for_product(&self, product_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`OrderRepository`].
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base query for flattened rows: orders joined with product and
    /// customer names.
    fn row_query(owner: Option<Uuid>) -> Select<order::Entity> {
        let mut query = order::Entity::find()
            .select_only()
            .column(order::Column::Id)
            .column(order::Column::Quantity)
            .column(order::Column::UnitPrice)
            .column(order::Column::DeliveryAddress)
            .column(order::Column::Status)
            .column(order::Column::CreatedAt)
            .column_as(product::Column::Name, "product_name")
            .column_as(user::Column::Name, "customer_name")
            .join(JoinType::LeftJoin, order::Relation::Product.def())
            .join(JoinType::LeftJoin, order::Relation::Customer.def());

        if let Some(owner) = owner {
            query = query.filter(order::Column::CustomerId.eq(owner));
        }

        query
    }
}

/// Intermediate row shape for the joined order queries.
#[derive(Debug, FromQueryResult)]
struct JoinedOrderRow {
    id: Uuid,
    quantity: i32,
    unit_price: rust_decimal::Decimal,
    delivery_address: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    product_name: Option<String>,
    customer_name: Option<String>,
}

impl From<JoinedOrderRow> for OrderRow {
    fn from(row: JoinedOrderRow) -> Self {
        let unit_price = row.unit_price;
        let total = unit_price * rust_decimal::Decimal::from(row.quantity);
        Self {
            id: row.id,
            product: row.product_name.unwrap_or_default(),
            customer: row.customer_name.unwrap_or_default(),
            quantity: row.quantity,
            unit_price,
            total,
            delivery_address: row.delivery_address,
            status: OrderStatus::from(row.status.as_str()),
            created_at: row.created_at,
        }
    }
}

/// Intermediate row shape for pre-mutation snapshots.
#[derive(Debug, FromQueryResult)]
struct SnapshotRow {
    id: Uuid,
    status: String,
    quantity: i32,
    customer_id: Uuid,
    customer_name: Option<String>,
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn insert(&self, new_order: NewOrder) -> AppResult<Order> {
        let active_model = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(new_order.product_id),
            customer_id: Set(new_order.customer_id),
            quantity: Set(new_order.quantity),
            unit_price: Set(new_order.unit_price),
            delivery_address: Set(new_order.delivery_address),
            status: Set(new_order.status.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Order::from(model))
    }

    async fn find_snapshot(&self, id: Uuid) -> AppResult<Option<OrderSnapshot>> {
        let row = order::Entity::find_by_id(id)
            .select_only()
            .column(order::Column::Id)
            .column(order::Column::Status)
            .column(order::Column::Quantity)
            .column(order::Column::CustomerId)
            .column_as(user::Column::Name, "customer_name")
            .join(JoinType::LeftJoin, order::Relation::Customer.def())
            .into_model::<SnapshotRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|r| OrderSnapshot {
            id: r.id,
            status: OrderStatus::from(r.status.as_str()),
            quantity: r.quantity,
            customer_id: r.customer_id,
            customer_name: r.customer_name,
        }))
    }

    async fn find_row(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<Option<OrderRow>> {
        let row = Self::row_query(owner)
            .filter(order::Column::Id.eq(id))
            .into_model::<JoinedOrderRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(OrderRow::from))
    }

    async fn list(&self, limit: u64, owner: Option<Uuid>) -> AppResult<Vec<OrderRow>> {
        let rows = Self::row_query(owner)
            .order_by_desc(order::Column::CreatedAt)
            .limit(limit)
            .into_model::<JoinedOrderRow>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(OrderRow::from).collect())
    }

    async fn update_details(
        &self,
        id: Uuid,
        quantity: i32,
        address: String,
        owner: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut query = order::Entity::update_many()
            .col_expr(order::Column::Quantity, Expr::value(quantity))
            .col_expr(order::Column::DeliveryAddress, Expr::value(address))
            .filter(order::Column::Id.eq(id));

        if let Some(owner) = owner {
            query = query.filter(order::Column::CustomerId.eq(owner));
        }

        let result = query.exec(&self.db).await.map_err(AppError::from)?;
        Ok(result.rows_affected)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<u64> {
        let result = order::Entity::update_many()
            .col_expr(order::Column::Status, Expr::value(status.as_str()))
            .filter(order::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<u64> {
        let mut query = order::Entity::delete_many().filter(order::Column::Id.eq(id));

        if let Some(owner) = owner {
            query = query.filter(order::Column::CustomerId.eq(owner));
        }

        let result = query.exec(&self.db).await.map_err(AppError::from)?;
        Ok(result.rows_affected)
    }

    async fn count_for_product(&self, product_id: Uuid) -> AppResult<u64> {
        order::Entity::find()
            .filter(order::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
