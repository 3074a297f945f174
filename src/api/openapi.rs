//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, log_handler, order_handler, product_handler, user_handler,
};
use crate::domain::{ActivityLogEntry, OrderRow, OrderStatus, Product, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::MutationAck;

/// OpenAPI documentation for the OrderDesk API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OrderDesk API",
        version = "0.1.0",
        description = "Order management API with role-gated mutations and an append-only activity log",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Order endpoints
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::create_order,
        order_handler::update_order,
        order_handler::change_status,
        order_handler::delete_order,
        // Product endpoints
        product_handler::list_products,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::change_role,
        // Activity log endpoints
        log_handler::list_logs,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            OrderStatus,
            OrderRow,
            Product,
            ActivityLogEntry,
            MutationAck,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Order handler types
            order_handler::CreateOrderRequest,
            order_handler::UpdateOrderRequest,
            order_handler::ChangeStatusRequest,
            // Product handler types
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            // User handler types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::ChangeRoleRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Orders", description = "Order lifecycle operations"),
        (name = "Products", description = "Product catalog management"),
        (name = "Users", description = "User directory and role management"),
        (name = "Activity", description = "Append-only activity log")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
