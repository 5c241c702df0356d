//! Cron handlers.
//!
//! These routes are hit by an external scheduler rather than a signed-in
//! user, so they sit outside the bearer-auth middleware. When a shared
//! cron secret is configured it is required; otherwise the route is open
//! (suitable only for private deployments).

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::{AppError, AppResult};

/// Expiry sweep result
#[derive(Debug, Serialize)]
pub struct ExpireSweepResponse {
    pub expired: u64,
}

/// Create cron routes
pub fn cron_routes() -> Router<AppState> {
    Router::new().route("/expire-bookings", get(expire_bookings))
}

fn check_cron_secret(state: &AppState, request: &Request) -> Result<(), AppError> {
    let Some(expected) = state.config.cron_secret.as_deref() else {
        return Ok(());
    };

    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    if provided == expected {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Sweep approved bookings whose end time has passed
#[utoipa::path(
    get,
    path = "/api/cron/expire-bookings",
    tag = "Cron",
    responses(
        (status = 200, description = "Sweep completed"),
        (status = 401, description = "Missing or invalid cron secret")
    )
)]
pub async fn expire_bookings(
    State(state): State<AppState>,
    request: Request,
) -> AppResult<Json<ExpireSweepResponse>> {
    check_cron_secret(&state, &request)?;

    let expired = state.booking_service.expire_overdue().await?;
    tracing::info!(expired, "Booking expiry sweep completed");

    Ok(Json(ExpireSweepResponse { expired }))
}
