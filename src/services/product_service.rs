//! Product service - catalog management.
//!
//! Deletion is guarded referentially: a product with orders cannot be
//! removed, and nothing cascades.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::gate;
use crate::config::MIN_PRODUCT_NAME_LENGTH;
use crate::domain::{Identity, NewProduct, Product};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Product catalog operations trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List products ordered by name
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Create a product (admin only)
    async fn create_product(
        &self,
        caller: &Identity,
        name: &str,
        unit_price: Decimal,
    ) -> AppResult<Uuid>;

    /// Update a product's name and price (admin only)
    async fn update_product(
        &self,
        caller: &Identity,
        id: Uuid,
        name: &str,
        unit_price: Decimal,
    ) -> AppResult<()>;

    /// Delete a product (admin only, blocked while orders reference it)
    async fn delete_product(&self, caller: &Identity, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of [`ProductService`] using Unit of Work.
pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    /// Create new product service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn validate_product(name: &str, unit_price: Decimal) -> AppResult<String> {
    let trimmed = name.trim();
    if (trimmed.len() as u64) < MIN_PRODUCT_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Product name must be at least {} characters",
            MIN_PRODUCT_NAME_LENGTH
        )));
    }
    if unit_price.is_sign_negative() {
        return Err(AppError::validation("Price must not be negative"));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.uow.products().list().await
    }

    async fn create_product(
        &self,
        caller: &Identity,
        name: &str,
        unit_price: Decimal,
    ) -> AppResult<Uuid> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        let name = validate_product(name, unit_price)?;
        let product = self
            .uow
            .products()
            .insert(NewProduct { name, unit_price })
            .await?;

        Ok(product.id)
    }

    async fn update_product(
        &self,
        caller: &Identity,
        id: Uuid,
        name: &str,
        unit_price: Decimal,
    ) -> AppResult<()> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        let name = validate_product(name, unit_price)?;
        let rows = self.uow.products().update(id, name, unit_price).await?;
        if rows == 0 {
            return Err(AppError::NotFound("Product"));
        }

        Ok(())
    }

    async fn delete_product(&self, caller: &Identity, id: Uuid) -> AppResult<()> {
        gate::require_admin(self.uow.users().as_ref(), caller).await?;

        // Referential guard, not a cascade: the check happens before
        // the delete and any referencing order blocks it.
        let references = self.uow.orders().count_for_product(id).await?;
        if references > 0 {
            return Err(AppError::conflict("Cannot delete a product that has orders"));
        }

        let rows = self.uow.products().delete(id).await?;
        if rows == 0 {
            return Err(AppError::NotFound("Product"));
        }

        Ok(())
    }
}
