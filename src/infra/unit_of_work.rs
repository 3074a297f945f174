//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait rather than on concrete stores, which
//! keeps them injectable with fakes in tests. Cross-store consistency
//! is handled by explicit compensation at the service level (the
//! credential/profile pair), not by database transactions: every
//! mutation in this system touches a single row, and the one
//! intentionally non-atomic side effect (the activity log append) must
//! not share the primary mutation's fate.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    ActivityLogRepository, ActivityLogStore, CredentialRepository, CredentialStore,
    OrderRepository, OrderStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user profile repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get credential repository
    fn credentials(&self) -> Arc<dyn CredentialRepository>;

    /// Get product repository
    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Get order repository
    fn orders(&self) -> Arc<dyn OrderRepository>;

    /// Get activity log repository
    fn activity(&self) -> Arc<dyn ActivityLogRepository>;
}

/// Concrete implementation of [`UnitOfWork`] over one database connection.
pub struct Persistence {
    users: Arc<UserStore>,
    credentials: Arc<CredentialStore>,
    products: Arc<ProductStore>,
    orders: Arc<OrderStore>,
    activity: Arc<ActivityLogStore>,
}

impl Persistence {
    /// Create a new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            credentials: Arc::new(CredentialStore::new(db.clone())),
            products: Arc::new(ProductStore::new(db.clone())),
            orders: Arc::new(OrderStore::new(db.clone())),
            activity: Arc::new(ActivityLogStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.credentials.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn activity(&self) -> Arc<dyn ActivityLogRepository> {
        self.activity.clone()
    }
}
