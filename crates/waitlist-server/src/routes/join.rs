use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use waitlist_core::submission::NewSubmission;

use crate::{error::AppError, extract::ApiJson, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Any JSON value; coerced to a boolean.
    pub api_access: Option<Value>,
    pub visitor_id: Option<String>,
}

/// `POST /api/join` — add an email to the waitlist.
///
/// `400 validation_error` when `email` is missing or blank; nothing is stored.
#[tracing::instrument(skip(state, payload))]
pub async fn record_join(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<JoinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let api_access = payload.api_access.as_ref().is_some_and(is_truthy);
    let submission =
        NewSubmission::join(payload.email, api_access, payload.visitor_id, payload.name)?;

    state.store.append(submission).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Successfully joined beta list"
    })))
}

/// Loose truthiness as browsers send it: `null`, `false`, `0` and `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
