use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{auth::middleware::require_admin, routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `CorsLayer`: permissive unless `WAITLIST_CORS_ORIGINS` is set.
/// 2. `TraceLayer`: structured request/response logging via `tracing`.
///
/// Admin routes (`/api/stats`, `/api/stats/data`, `DELETE /api/submissions/{id}`)
/// sit behind [`require_admin`]. Anything unmatched is served from the public dir.
pub fn build_app(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/api/stats", get(routes::stats::stats_dashboard))
        .route("/api/stats/data", get(routes::stats::stats_data))
        .route(
            "/api/submissions/{id}",
            delete(routes::submissions::delete_submission),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_admin,
        ));

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/visit", post(routes::visit::record_visit))
        .route("/api/join", post(routes::join::record_join))
        .route("/api/feedback", post(routes::feedback::record_feedback))
        .merge(admin)
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}
