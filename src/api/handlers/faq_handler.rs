//! FAQ handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser, RequestMeta};
use crate::api::AppState;
use crate::domain::{FaqChanges, FaqResponse, NewFaq};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// FAQ creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFaqRequest {
    #[validate(length(min = 1, message = "A question is required"))]
    #[schema(example = "How far ahead can I book?")]
    pub question: String,
    #[validate(length(min = 1, message = "An answer is required"))]
    #[schema(example = "Bookings open 14 days in advance.")]
    pub answer: String,
    pub category: Option<String>,
}

/// FAQ update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFaqRequest {
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: Option<String>,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// Create FAQ routes
pub fn faq_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faqs).post(create_faq))
        .route("/:id", put(update_faq).delete(delete_faq))
}

/// List FAQs
#[utoipa::path(
    get,
    path = "/api/faqs",
    tag = "FAQs",
    responses(
        (status = 200, description = "FAQ list", body = [FaqResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_faqs(State(state): State<AppState>) -> AppResult<Json<Vec<FaqResponse>>> {
    let faqs = state.faq_service.list_faqs().await?;
    Ok(Json(faqs.into_iter().map(FaqResponse::from).collect()))
}

/// Create a FAQ (admin)
#[utoipa::path(
    post,
    path = "/api/faqs",
    tag = "FAQs",
    request_body = CreateFaqRequest,
    responses(
        (status = 201, description = "FAQ created", body = FaqResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_faq(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    ValidatedJson(payload): ValidatedJson<CreateFaqRequest>,
) -> AppResult<Created<FaqResponse>> {
    require_admin(&current)?;

    let faq = state
        .faq_service
        .create_faq(
            meta.actor(current.id),
            NewFaq {
                question: payload.question,
                answer: payload.answer,
                category: payload.category,
            },
        )
        .await?;

    Ok(Created(FaqResponse::from(faq)))
}

/// Update a FAQ (admin)
#[utoipa::path(
    put,
    path = "/api/faqs/{id}",
    tag = "FAQs",
    params(("id" = Uuid, Path, description = "FAQ id")),
    request_body = UpdateFaqRequest,
    responses(
        (status = 200, description = "FAQ updated", body = FaqResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "FAQ not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_faq(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFaqRequest>,
) -> AppResult<Json<FaqResponse>> {
    require_admin(&current)?;

    let faq = state
        .faq_service
        .update_faq(
            meta.actor(current.id),
            id,
            FaqChanges {
                question: payload.question,
                answer: payload.answer,
                category: payload.category,
            },
        )
        .await?;

    Ok(Json(FaqResponse::from(faq)))
}

/// Delete a FAQ (admin)
#[utoipa::path(
    delete,
    path = "/api/faqs/{id}",
    tag = "FAQs",
    params(("id" = Uuid, Path, description = "FAQ id")),
    responses(
        (status = 204, description = "FAQ deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "FAQ not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_faq(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current)?;

    state.faq_service.delete_faq(meta.actor(current.id), id).await?;
    Ok(NoContent)
}
