//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod activity_log_repository;
mod credential_repository;
pub(crate) mod entities;
mod order_repository;
mod product_repository;
mod user_repository;

pub use activity_log_repository::{ActivityLogRepository, ActivityLogStore};
pub use credential_repository::{CredentialRepository, CredentialStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for in-crate unit tests
#[cfg(test)]
pub use activity_log_repository::MockActivityLogRepository;
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
