//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{ActivityService, AuthService, OrderService, ProductService, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User directory service
    pub user_service: Arc<dyn UserService>,
    /// Order service
    pub order_service: Arc<dyn OrderService>,
    /// Product catalog service
    pub product_service: Arc<dyn ProductService>,
    /// Activity log read service
    pub activity_service: Arc<dyn ActivityService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// This is the recommended way to create AppState as it wires all
    /// services over one shared unit of work.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            order_service: services.orders(),
            product_service: services.products(),
            activity_service: services.activity(),
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        order_service: Arc<dyn OrderService>,
        product_service: Arc<dyn ProductService>,
        activity_service: Arc<dyn ActivityService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            order_service,
            product_service,
            activity_service,
            database,
        }
    }
}
