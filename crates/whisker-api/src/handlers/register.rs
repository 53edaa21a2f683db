use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::RegisterOutcome;
use crate::state::AppState;
use crate::utils::upload::extract_upload_request;

/// Register a known cat without classification
///
/// Multipart fields: `image`, `chat_name`, `owner_email`. Redirects to `/` once
/// registered, or back to `/register` when the file is not acceptable.
#[utoipa::path(
    post,
    path = "/register",
    tag = "registry",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Registered (redirect to /) or rejected file (redirect to /register)"),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 500, description = "Archive or registry failure", body = ErrorResponse)
    )
)]
pub async fn register_chat(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect, HttpAppError> {
    let request = extract_upload_request(multipart, "image", "chat_name", "owner_email").await?;

    match state.pipeline.register_existing(request).await? {
        RegisterOutcome::NoFile => Ok(Redirect::to("/register")),
        RegisterOutcome::Registered(_) => Ok(Redirect::to("/")),
    }
}
