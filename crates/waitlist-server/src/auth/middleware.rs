use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    auth::GateRejection,
    error::AppError,
    state::AppState,
};

/// Require valid admin Basic credentials before running the inner handler.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let outcome = state
        .gate
        .authenticate(request.headers().get(header::AUTHORIZATION))
        .await;

    match outcome {
        Ok(()) => next.run(request).await,
        Err(GateRejection::Auth(e)) => AppError::Unauthorized(e).into_response(),
        Err(GateRejection::Config(e)) => AppError::Config(e).into_response(),
    }
}
