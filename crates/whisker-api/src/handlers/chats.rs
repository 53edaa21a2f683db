use std::sync::Arc;

use axum::{extract::State, Json};
use whisker_core::models::ChatRecord;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List registered cats, most recent first
#[utoipa::path(
    get,
    path = "/chats",
    tag = "registry",
    responses(
        (status = 200, description = "Registered cats", body = Vec<ChatRecord>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_chats"))]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatRecord>>, HttpAppError> {
    let records = state.pipeline.store().list_records().await?;
    Ok(Json(records))
}
