use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use waitlist_core::submission::NewSubmission;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub visitor_id: Option<String>,
}

impl VisitRequest {
    /// Beacons may send no body, no content type or junk; all of those
    /// still count as an anonymous visit.
    fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// `POST /api/visit` — record a page view.
///
/// The user agent comes from the request header, not the body. Only a
/// storage failure makes this fail.
#[tracing::instrument(skip(state, headers, body))]
pub async fn record_visit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload = VisitRequest::from_body(&body);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state
        .store
        .append(NewSubmission::visit(payload.visitor_id, user_agent))
        .await?;

    Ok(Json(json!({ "success": true })))
}
