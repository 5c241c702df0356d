//! Admin handlers: booking review, user moderation, audit trail, global alerts.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser, RequestMeta};
use crate::api::AppState;
use crate::domain::{
    ActivityLogResponse, AlertResponse, AlertSeverity, BanDuration, BookingResponse,
    EquipmentState, UserResponse,
};
use crate::errors::AppResult;
use crate::services::GlobalAlertRequest;
use crate::types::{Created, Paginated, PaginationParams};

/// Booking approval request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApproveBookingRequest {
    /// Optional note shown to the requester
    pub response: Option<String>,
}

/// Booking denial request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DenyBookingRequest {
    #[validate(length(min = 1, message = "A denial reason is required"))]
    #[schema(example = "The hall is reserved for exams that week")]
    pub response: String,
}

/// Equipment status update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNeedsRequest {
    pub status: EquipmentState,
    pub note: Option<String>,
}

/// User ban request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BanUserRequest {
    #[validate(length(min = 1, message = "A ban reason is required"))]
    #[schema(example = "Repeated no-shows")]
    pub reason: String,
    pub duration: BanDuration,
    /// Required when duration is "custom"
    pub custom_date: Option<DateTime<Utc>>,
}

/// Global alert creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlertRequest {
    #[validate(length(min = 1, message = "An alert type is required"))]
    #[schema(example = "maintenance")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    #[validate(length(min = 1, message = "A title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "A message is required"))]
    pub message: String,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings/:id/approve", post(approve_booking))
        .route("/bookings/:id/deny", post(deny_booking))
        .route("/bookings/:id/needs", post(update_needs))
        .route("/users", get(list_users))
        .route("/users/:id/ban", post(ban_user))
        .route("/users/:id/unban", post(unban_user))
        .route("/activity", get(list_activity))
        .route("/alerts", get(list_alerts).post(create_alert))
}

/// Approve a pending booking
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/approve",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = ApproveBookingRequest,
    responses(
        (status = 200, description = "Booking approved", body = BookingResponse),
        (status = 400, description = "Booking is not pending"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Time range now conflicts with another booking")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ApproveBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    require_admin(&current)?;

    let booking = state
        .booking_service
        .approve_booking(meta.actor(current.id), id, payload.response)
        .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// Deny a pending booking
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/deny",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = DenyBookingRequest,
    responses(
        (status = 200, description = "Booking denied", body = BookingResponse),
        (status = 400, description = "Booking is not pending"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deny_booking(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<DenyBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    require_admin(&current)?;

    let booking = state
        .booking_service
        .deny_booking(meta.actor(current.id), id, payload.response)
        .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// Record equipment preparation status on a booking
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/needs",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = UpdateNeedsRequest,
    responses(
        (status = 200, description = "Equipment status recorded", body = BookingResponse),
        (status = 400, description = "Booking is not pending or approved"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_needs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNeedsRequest>,
) -> AppResult<Json<BookingResponse>> {
    require_admin(&current)?;

    let booking = state
        .booking_service
        .update_needs(meta.actor(current.id), id, payload.status, payload.note)
        .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// List users (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "User list"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    require_admin(&current)?;

    let (page, per_page) = (params.page, params.limit());
    let (users, total) = state.user_service.list_users(params).await?;

    Ok(Json(Paginated::new(
        users.into_iter().map(UserResponse::from).collect(),
        page,
        per_page,
        total,
    )))
}

/// Ban a user
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/ban",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = BanUserRequest,
    responses(
        (status = 200, description = "User banned", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn ban_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<BanUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current)?;

    let user = state
        .user_service
        .ban_user(
            meta.actor(current.id),
            id,
            payload.reason,
            payload.duration,
            payload.custom_date,
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Unban a user
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/unban",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User restored to active", body = UserResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unban_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current)?;

    let user = state
        .user_service
        .unban_user(meta.actor(current.id), id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// List the audit trail (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/activity",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Activity log entries"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_activity(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ActivityLogResponse>>> {
    require_admin(&current)?;

    let (page, per_page) = (params.page, params.limit());
    let (entries, total) = state.user_service.list_activity(params).await?;

    Ok(Json(Paginated::new(
        entries.into_iter().map(ActivityLogResponse::from).collect(),
        page,
        per_page,
        total,
    )))
}

/// List global alerts
#[utoipa::path(
    get,
    path = "/api/admin/alerts",
    tag = "Admin",
    responses(
        (status = 200, description = "Global alerts", body = [AlertResponse]),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AlertResponse>>> {
    require_admin(&current)?;

    let alerts = state.notification_service.list_global().await?;
    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

/// Create a global alert
#[utoipa::path(
    post,
    path = "/api/admin/alerts",
    tag = "Admin",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert created", body = AlertResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_alert(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    ValidatedJson(payload): ValidatedJson<CreateAlertRequest>,
) -> AppResult<Created<AlertResponse>> {
    require_admin(&current)?;

    let alert = state
        .notification_service
        .create_global_alert(
            meta.actor(current.id),
            GlobalAlertRequest {
                alert_type: payload.alert_type,
                severity: payload.severity,
                title: payload.title,
                message: payload.message,
            },
        )
        .await?;

    Ok(Created(AlertResponse::from(alert)))
}
