//! HTTP request handlers.

pub mod auth_handler;
pub mod log_handler;
pub mod order_handler;
pub mod product_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use log_handler::log_routes;
pub use order_handler::order_routes;
pub use product_handler::product_routes;
pub use user_handler::user_routes;
