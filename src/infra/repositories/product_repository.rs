//! Product repository - catalog persistence.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::product;
use crate::domain::{NewProduct, Product};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Product persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// List products ordered by name
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// Overwrite name and price; returns affected rows
    async fn update(&self, id: Uuid, name: String, unit_price: Decimal) -> AppResult<u64>;

    /// Delete a product; returns affected rows
    async fn delete(&self, id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`ProductRepository`].
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, new_product: NewProduct) -> AppResult<Product> {
        let active_model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_product.name),
            unit_price: Set(new_product.unit_price),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Product::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update(&self, id: Uuid, name: String, unit_price: Decimal) -> AppResult<u64> {
        let result = product::Entity::update_many()
            .col_expr(product::Column::Name, Expr::value(name))
            .col_expr(product::Column::UnitPrice, Expr::value(unit_price))
            .filter(product::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
