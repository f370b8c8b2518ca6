use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use waitlist_core::error::{StoreError, ValidationError};

use crate::auth::{AuthError, ConfigError};

/// Challenge sent with every 401.
pub const ADMIN_REALM_CHALLENGE: &str = "Basic realm=\"Admin Access\"";

/// Application-level errors that map directly to HTTP responses.
///
/// Every variant implements [`IntoResponse`] so Axum handlers can use
/// `Result<impl IntoResponse, AppError>` as their return type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("admin configuration unavailable: {0}")]
    Config(#[from] ConfigError),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg.clone(),
                None,
            ),
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                e.to_string(),
                Some(e.field()),
            ),
            AppError::Unauthorized(e) => {
                match e {
                    AuthError::InvalidCredentials => {
                        tracing::warn!("Admin request rejected: invalid credentials")
                    }
                    other => tracing::info!(reason = %other, "Admin request challenged"),
                }
                (
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    e.to_string(),
                    None,
                )
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "Admin config unavailable, denying access");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config_error",
                    "Server configuration error".to_string(),
                    None,
                )
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Submission store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "Failed to access submissions".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut response = (
            status,
            Json(json!({
                "error": {
                    "code": code,
                    "message": message,
                    "field": field
                }
            })),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(ADMIN_REALM_CHALLENGE),
            );
        }

        response
    }
}
