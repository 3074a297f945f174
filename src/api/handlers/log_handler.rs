//! Activity log handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ActivityLogEntry;
use crate::errors::AppResult;

/// Activity log query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListLogsQuery {
    /// Maximum number of entries (default 500)
    pub limit: Option<u64>,
    /// Only entries referencing this order
    pub order_id: Option<Uuid>,
}

/// Create activity log routes
pub fn log_routes() -> Router<AppState> {
    Router::new().route("/", get(list_logs))
}

/// List recent activity, newest first
#[utoipa::path(
    get,
    path = "/logs",
    tag = "Activity",
    params(ListLogsQuery),
    responses(
        (status = 200, description = "Recent activity entries", body = [ActivityLogEntry]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<ListLogsQuery>,
) -> AppResult<Json<Vec<ActivityLogEntry>>> {
    let entries = state
        .activity_service
        .list_recent(query.limit, query.order_id)
        .await?;

    Ok(Json(entries))
}
