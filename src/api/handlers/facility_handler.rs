//! Facility handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser, RequestMeta};
use crate::api::AppState;
use crate::domain::{FacilityChanges, FacilityResponse, NewFacility};
use crate::errors::AppResult;
use crate::types::Created;

/// Facility creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacilityRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Lecture Hall B")]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    #[schema(example = 40)]
    pub capacity: i32,
}

/// Facility update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFacilityRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// Create facility routes
pub fn facility_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_facilities).post(create_facility))
        .route("/:id", get(get_facility).put(update_facility))
}

/// List facilities
#[utoipa::path(
    get,
    path = "/api/facilities",
    tag = "Facilities",
    responses(
        (status = 200, description = "Facility list", body = [FacilityResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<FacilityResponse>>> {
    // Admins also see facilities taken out of service
    let facilities = state
        .facility_service
        .list_facilities(current.is_admin())
        .await?;

    Ok(Json(
        facilities.into_iter().map(FacilityResponse::from).collect(),
    ))
}

/// Get a single facility
#[utoipa::path(
    get,
    path = "/api/facilities/{id}",
    tag = "Facilities",
    params(("id" = Uuid, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Facility", body = FacilityResponse),
        (status = 404, description = "Facility not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FacilityResponse>> {
    let facility = state.facility_service.get_facility(id).await?;
    Ok(Json(FacilityResponse::from(facility)))
}

/// Create a facility (admin)
#[utoipa::path(
    post,
    path = "/api/facilities",
    tag = "Facilities",
    request_body = CreateFacilityRequest,
    responses(
        (status = 201, description = "Facility created", body = FacilityResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_facility(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    ValidatedJson(payload): ValidatedJson<CreateFacilityRequest>,
) -> AppResult<Created<FacilityResponse>> {
    require_admin(&current)?;

    let facility = state
        .facility_service
        .create_facility(
            meta.actor(current.id),
            NewFacility {
                name: payload.name,
                description: payload.description,
                capacity: payload.capacity,
            },
        )
        .await?;

    Ok(Created(FacilityResponse::from(facility)))
}

/// Update a facility (admin)
#[utoipa::path(
    put,
    path = "/api/facilities/{id}",
    tag = "Facilities",
    params(("id" = Uuid, Path, description = "Facility id")),
    request_body = UpdateFacilityRequest,
    responses(
        (status = 200, description = "Facility updated", body = FacilityResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Facility not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFacilityRequest>,
) -> AppResult<Json<FacilityResponse>> {
    require_admin(&current)?;

    let facility = state
        .facility_service
        .update_facility(
            meta.actor(current.id),
            id,
            FacilityChanges {
                name: payload.name,
                description: payload.description,
                capacity: payload.capacity,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(FacilityResponse::from(facility)))
}
