use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use whisker_core::models::DetectionResult;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::DetectionOutcome;
use crate::state::AppState;
use crate::utils::upload::extract_upload_request;

/// Detect a cat in an uploaded photo
///
/// Multipart fields: `image` (png/jpg/jpeg), `name`, `email`. Cats are archived,
/// registered and their owner is notified by email (best-effort). An upload without
/// an acceptable image is answered with a redirect to the upload form.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "detection",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image classified", body = DetectionResult),
        (status = 303, description = "No acceptable image; redirect to /"),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 502, description = "Classifier failed", body = ErrorResponse),
        (status = 500, description = "Storage or registry failure", body = ErrorResponse)
    )
)]
pub async fn detect_cat(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let request = extract_upload_request(multipart, "image", "name", "email").await?;

    match state.pipeline.process(request).await? {
        DetectionOutcome::NoFile => Ok(Redirect::to("/").into_response()),
        DetectionOutcome::Completed(report) => Ok(Json(report.result).into_response()),
    }
}
