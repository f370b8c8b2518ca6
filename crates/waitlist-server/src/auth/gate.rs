use std::sync::Arc;

use axum::http::HeaderValue;
use thiserror::Error;

use super::basic::{AuthError, BasicCredentials};
use super::credentials::{ConfigError, CredentialSource};

/// Why the gate refused a request.
#[derive(Debug, Error)]
pub enum GateRejection {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Stateless credential check in front of the stats and delete routes.
///
/// Expected credentials are loaded from the injected [`CredentialSource`]
/// on every call. If they cannot be loaded the request is denied.
#[derive(Clone)]
pub struct AdminGate {
    source: Arc<dyn CredentialSource>,
}

impl AdminGate {
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }

    /// Authenticate the raw `Authorization` header value, if any.
    ///
    /// The credential source is consulted before the header is inspected, so
    /// a broken config answers 500 even to anonymous callers.
    pub async fn authenticate(&self, header: Option<&HeaderValue>) -> Result<(), GateRejection> {
        let expected = self.source.load().await?;
        let presented = BasicCredentials::from_header(header)?;
        if expected.verify(&presented.username, &presented.password) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials.into())
        }
    }
}
