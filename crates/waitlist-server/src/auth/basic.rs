use axum::http::HeaderValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Why a request did not authenticate.
///
/// `Missing` and `Malformed` mean the client never presented usable
/// credentials; `InvalidCredentials` means it presented the wrong ones.
/// All three answer 401 with a challenge but are logged differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Missing,

    #[error("Malformed authorization header")]
    Malformed,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Username/password decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode an `Authorization` header value.
    ///
    /// The password is everything after the first `:`, so passwords may
    /// themselves contain colons.
    pub fn from_header(value: Option<&HeaderValue>) -> Result<Self, AuthError> {
        let raw = value.ok_or(AuthError::Missing)?;
        let raw = raw.to_str().map_err(|_| AuthError::Malformed)?.trim();
        if raw.is_empty() {
            return Err(AuthError::Missing);
        }

        let (scheme, encoded) = raw.split_once(' ').ok_or(AuthError::Malformed)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::Malformed);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::Malformed)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Malformed)?;
        let (username, password) = decoded.split_once(':').ok_or(AuthError::Malformed)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}
