//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateUserInput, UpdateUserInput, UserResponse};
use crate::errors::AppResult;
use crate::types::MutationAck;

/// Account creation request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name (minimum 2 characters)
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Login email
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Role: "admin" or "user"
    #[schema(example = "user")]
    pub role: String,
}

/// Account update request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// New role, if it changes
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// Role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    /// Role: "admin" or "user"
    #[schema(example = "admin")]
    pub role: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_current_user))
        .route("/:id", patch(update_user).delete(delete_user))
        .route("/:id/role", patch(change_role))
}

/// Get the calling user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let profile = state.user_service.get_user(user.id).await?;

    Ok(Json(UserResponse::from(profile)))
}

/// List user profiles (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user profiles", body = [UserResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users(&user.identity()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<MutationAck>)> {
    let id = state
        .user_service
        .create_user(
            &user.identity(),
            CreateUserInput {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                role: payload.role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MutationAck::created(id))))
}

/// Update another account (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = MutationAck),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required, or own account"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<MutationAck>> {
    state
        .user_service
        .update_user(
            &user.identity(),
            id,
            UpdateUserInput {
                name: payload.name,
                email: payload.email,
                role: payload.role,
            },
        )
        .await?;

    Ok(Json(MutationAck::ok()))
}

/// Delete another account (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted", body = MutationAck),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required, or own account"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MutationAck>> {
    state.user_service.delete_user(&user.identity(), id).await?;

    Ok(Json(MutationAck::ok()))
}

/// Change another account's role (admin only, never your own)
#[utoipa::path(
    patch,
    path = "/users/{id}/role",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = MutationAck),
        (status = 400, description = "Role outside the allowed set"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required, or own role"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_role(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<Json<MutationAck>> {
    state
        .user_service
        .change_role(&user.identity(), id, &payload.role)
        .await?;

    Ok(Json(MutationAck::ok()))
}
