//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Unit of Work for centralized repository access

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ActivityLogRepository, ActivityLogStore, CredentialRepository, CredentialStore,
    OrderRepository, OrderStore, ProductRepository, ProductStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};
