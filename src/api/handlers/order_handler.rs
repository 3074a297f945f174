//! Order handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateOrderInput, OrderRow};
use crate::errors::AppResult;
use crate::types::MutationAck;

/// Order creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Product being ordered
    pub product_id: Uuid,
    /// Number of units (positive)
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 3, minimum = 1)]
    pub quantity: i32,
    /// Delivery address (minimum 5 characters)
    #[validate(length(min = 5, message = "Delivery address must be at least 5 characters"))]
    #[schema(example = "Main St 42")]
    pub delivery_address: String,
    /// Admin only: create the order for this customer
    pub customer_id: Option<Uuid>,
}

/// Order detail update request (quantity and address only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2, minimum = 1)]
    pub quantity: i32,
    #[validate(length(min = 5, message = "Delivery address must be at least 5 characters"))]
    #[schema(example = "Main St 42")]
    pub delivery_address: String,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeStatusRequest {
    /// One of CREATED, PROCESSING, SHIPPED, DELIVERED, CANCELLED
    #[schema(example = "SHIPPED")]
    pub status: String,
}

/// Order list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// Maximum number of rows (default 500)
    pub limit: Option<u64>,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/:id",
            get(get_order).patch(update_order).delete(delete_order),
        )
        .route("/:id/status", patch(change_status))
}

/// List orders, newest first
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Flattened order rows", body = [OrderRow]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<OrderRow>>> {
    let rows = state
        .order_service
        .list_orders(&user.identity(), query.limit)
        .await?;

    Ok(Json(rows))
}

/// Get one order
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Flattened order row", body = OrderRow),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderRow>> {
    let row = state.order_service.get_order(&user.identity(), id).await?;

    Ok(Json(row))
}

/// Create an order
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Customer selection requires admin"),
        (status = 404, description = "Product or customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<MutationAck>)> {
    let id = state
        .order_service
        .create_order(
            &user.identity(),
            CreateOrderInput {
                product_id: payload.product_id,
                quantity: payload.quantity,
                delivery_address: payload.delivery_address,
                customer_id: payload.customer_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MutationAck::created(id))))
}

/// Update an order's quantity and delivery address
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> AppResult<Json<MutationAck>> {
    state
        .order_service
        .update_details(
            &user.identity(),
            id,
            payload.quantity,
            &payload.delivery_address,
        )
        .await?;

    Ok(Json(MutationAck::ok()))
}

/// Change an order's status (admin only)
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = MutationAck),
        (status = 400, description = "Status outside the allowed set"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeStatusRequest>,
) -> AppResult<Json<MutationAck>> {
    state
        .order_service
        .change_status(&user.identity(), id, &payload.status)
        .await?;

    Ok(Json(MutationAck::ok()))
}

/// Delete an order (owner or admin)
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = MutationAck),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the order's owner"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MutationAck>> {
    state
        .order_service
        .delete_order(&user.identity(), id)
        .await?;

    Ok(Json(MutationAck::ok()))
}
