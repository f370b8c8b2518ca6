use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use waitlist_core::submission::NewSubmission;

use crate::{error::AppError, extract::ApiJson, state::AppState};

/// Wire field `feedback` is stored as `content`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub feedback: Option<String>,
    pub visitor_id: Option<String>,
}

/// `POST /api/feedback` — store free-form feedback.
#[tracing::instrument(skip(state, payload))]
pub async fn record_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let submission = NewSubmission::feedback(payload.feedback, payload.visitor_id)?;

    state.store.append(submission).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Feedback received"
    })))
}
