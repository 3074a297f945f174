//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and receive the caller's `Identity` explicitly.
//!
//! All services use the Unit of Work for centralized repository access.

mod activity_service;
mod auth_service;
mod container;
mod gate;
mod order_service;
mod product_service;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use activity_service::{ActivityReader, ActivityService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};
pub use user_service::{UserManager, UserService};
