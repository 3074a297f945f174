//! Product handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Product;
use crate::errors::AppResult;
use crate::types::MutationAck;

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Product name (minimum 2 characters)
    #[validate(length(min = 2, message = "Product name must be at least 2 characters"))]
    #[schema(example = "Espresso Machine")]
    pub name: String,
    /// Non-negative unit price
    #[schema(example = "199.90")]
    pub unit_price: Decimal,
}

/// Product update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 2, message = "Product name must be at least 2 characters"))]
    #[schema(example = "Espresso Machine")]
    pub name: String,
    #[schema(example = "179.90")]
    pub unit_price: Decimal,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", patch(update_product).delete(delete_product))
}

/// List products ordered by name
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "Product catalog", body = [Product]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.product_service.list_products().await?;

    Ok(Json(products))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<MutationAck>)> {
    let id = state
        .product_service
        .create_product(&user.identity(), &payload.name, payload.unit_price)
        .await?;

    Ok((StatusCode::CREATED, Json(MutationAck::created(id))))
}

/// Update a product (admin only)
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<MutationAck>> {
    state
        .product_service
        .update_product(&user.identity(), id, &payload.name, payload.unit_price)
        .await?;

    Ok(Json(MutationAck::ok()))
}

/// Delete a product (admin only, blocked while orders reference it)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MutationAck),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Orders still reference the product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MutationAck>> {
    state
        .product_service
        .delete_product(&user.identity(), id)
        .await?;

    Ok(Json(MutationAck::ok()))
}
