//! Booking handlers (student-facing surface).

use axum::{
    extract::{Path, State},
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
use crate::domain::BookingResponse;
use crate::errors::AppResult;
use crate::services::BookingRequest;
use crate::types::Created;

/// Booking creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(min = 1, message = "A booking purpose is required"))]
    #[schema(example = "Robotics club meeting")]
    pub purpose: String,
    /// Equipment items to prepare, if any
    pub equipment: Option<Vec<String>>,
}

/// Create booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/all", get(list_bookings))
        .route("/pending", get(list_pending))
        .route("/:id/cancel", post(cancel_booking))
}

/// Request a booking
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created as pending", body = BookingResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Facility not found"),
        (status = 409, description = "Time range conflicts with an existing booking")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<Created<BookingResponse>> {
    let booking = state
        .booking_service
        .create_booking(
            meta.actor(current.id),
            BookingRequest {
                facility_id: payload.facility_id,
                start_time: payload.start_time,
                end_time: payload.end_time,
                purpose: payload.purpose,
                equipment: payload.equipment,
            },
        )
        .await?;

    Ok(Created(BookingResponse::from(booking)))
}

/// List bookings visible to the caller
///
/// Admins see everything; students see approved bookings plus their own,
/// within a rolling window around now.
#[utoipa::path(
    get,
    path = "/api/bookings/all",
    tag = "Bookings",
    responses(
        (status = 200, description = "Visible bookings", body = [BookingResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .booking_service
        .list_bookings(current.id, current.is_admin())
        .await?;

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// List bookings awaiting review (admin)
#[utoipa::path(
    get,
    path = "/api/bookings/pending",
    tag = "Bookings",
    responses(
        (status = 200, description = "Pending bookings", body = [BookingResponse]),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    require_admin(&current)?;

    let bookings = state.booking_service.list_pending().await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// Cancel a booking (owner or admin)
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 400, description = "Booking is not cancellable"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .booking_service
        .cancel_booking(meta.actor(current.id), current.is_admin(), id)
        .await?;

    Ok(Json(BookingResponse::from(booking)))
}
