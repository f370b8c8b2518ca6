use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

use waitlist_core::stats::compute_stats;

use crate::{error::AppError, state::AppState};

/// `GET /api/stats/data` — admin only.
///
/// Aggregates the full submission log on every call; nothing is cached.
///
/// Response shape:
/// ```json
/// { "totalVisitors": 1, "totalJoins": 1, "totalFeedback": 0, "leads": [...], "feedback": [...] }
/// ```
#[tracing::instrument(skip(state))]
pub async fn stats_data(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let submissions = state.store.load_all().await?;
    Ok(Json(compute_stats(&submissions)))
}

/// `GET /api/stats` — admin only. Serves `stats.html` from the public dir.
#[tracing::instrument(skip(state))]
pub async fn stats_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.config.public_dir.join("stats.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound("Dashboard not found".to_string()))
        }
        Err(e) => Err(AppError::Internal(
            anyhow::Error::new(e).context(format!("reading {}", path.display())),
        )),
    }
}
