use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// `DELETE /api/submissions/:id` — admin only.
///
/// `404 not_found` when no record has this id, including when the
/// submissions document does not exist yet.
#[tracing::instrument(skip(state))]
pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_by_id(&id).await? {
        return Err(AppError::NotFound("Submission not found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Record deleted"
    })))
}
