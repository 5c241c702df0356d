//! Session handlers.

use axum::{extract::State, response::Json, routing::post, Extension, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::Principal;

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/", post(sync_session))
}

/// Sync the caller's user record from their verified identity.
///
/// Upsert-on-login: creates the record on first sign-in, refreshes the
/// email on later ones.
#[utoipa::path(
    post,
    path = "/api/session",
    tag = "Session",
    responses(
        (status = 200, description = "User record synced", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn sync_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .sync_profile(Principal {
            id: current.id,
            email: current.email,
        })
        .await?;

    Ok(Json(UserResponse::from(user)))
}
