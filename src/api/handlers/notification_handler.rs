//! Notification handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::AlertResponse;
use crate::errors::AppResult;

/// Mark-read request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkReadRequest {
    pub id: Uuid,
}

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/", get(list_notifications).post(mark_read))
}

/// List the caller's notifications
///
/// Admins see global alerts; students see their own. Read equipment
/// notices are retired from both views.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Notifications", body = [AlertResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AlertResponse>>> {
    let alerts = if current.is_admin() {
        state.notification_service.list_global().await?
    } else {
        state.notification_service.list_for_user(current.id).await?
    };

    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

/// Mark a notification read
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notifications",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Notification marked read", body = AlertResponse),
        (status = 404, description = "Notification not found or not visible to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<MarkReadRequest>,
) -> AppResult<Json<AlertResponse>> {
    let alert = state
        .notification_service
        .mark_read(current.id, current.is_admin(), payload.id)
        .await?;

    Ok(Json(AlertResponse::from(alert)))
}
