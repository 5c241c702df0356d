use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Created response helper (DRY - common pattern for POST endpoints).
///
/// Serializes the payload the same way the 200 handlers do, as a bare
/// JSON body, differing only in the status code.
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// No content response helper (DRY - common pattern for DELETE endpoints)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
