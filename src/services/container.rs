//! Service Container - centralized service construction and access.
//!
//! Wires every service over one shared `Persistence` unit of work so
//! the API layer only ever sees service trait objects.

use std::sync::Arc;

use super::{
    ActivityReader, ActivityService, AuthService, Authenticator, OrderManager, OrderService,
    ProductManager, ProductService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete container holding all application services
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    order_service: Arc<dyn OrderService>,
    product_service: Arc<dyn ProductService>,
    activity_service: Arc<dyn ActivityService>,
}

impl Services {
    /// Create service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            order_service: Arc::new(OrderManager::new(uow.clone())),
            product_service: Arc::new(ProductManager::new(uow.clone())),
            activity_service: Arc::new(ActivityReader::new(uow)),
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get order service
    pub fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    /// Get product service
    pub fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    /// Get activity service
    pub fn activity(&self) -> Arc<dyn ActivityService> {
        self.activity_service.clone()
    }
}
