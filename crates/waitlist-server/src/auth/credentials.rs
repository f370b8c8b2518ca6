use std::io::ErrorKind;
use std::path::PathBuf;

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// The admin credentials could not be obtained. The gate fails closed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("admin config not found at {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read admin config: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("admin config is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("admin config must set a non-empty username and a password or passwordHash")]
    Incomplete,
}

/// Contents of the admin config file.
///
/// `passwordHash` (an Argon2 PHC string) takes precedence over a plaintext
/// `password` when both are present.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminCredentials {
    pub fn plaintext(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            password_hash: None,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let has_secret = self
            .password_hash
            .as_deref()
            .or(self.password.as_deref())
            .is_some_and(|s| !s.is_empty());
        if self.username.is_empty() || !has_secret {
            return Err(ConfigError::Incomplete);
        }
        Ok(self)
    }

    /// Check a presented username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = digest_eq(username, &self.username);
        let pass_ok = match (&self.password_hash, &self.password) {
            (Some(hash), _) => verify_password(password, hash),
            (None, Some(expected)) => digest_eq(password, expected),
            (None, None) => false,
        };
        user_ok && pass_ok
    }
}

/// Compare SHA-256 digests so the comparison time does not depend on how
/// many leading bytes of the secret match.
fn digest_eq(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Verify a password against an Argon2 PHC hash. Unparseable hashes never match.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Where the Admin Gate gets the expected credentials from.
#[async_trait]
pub trait CredentialSource: Send + Sync + 'static {
    async fn load(&self) -> Result<AdminCredentials, ConfigError>;
}

/// Reads the admin config JSON file on every call, so edits take effect
/// without a restart.
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialSource for FileCredentialSource {
    async fn load(&self) -> Result<AdminCredentials, ConfigError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::Missing(self.path.clone()))
            }
            Err(e) => return Err(ConfigError::Unreadable(e)),
        };
        serde_json::from_slice::<AdminCredentials>(&bytes)?.validate()
    }
}

/// Fixed credentials, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticCredentialSource(pub AdminCredentials);

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    async fn load(&self) -> Result<AdminCredentials, ConfigError> {
        self.0.clone().validate()
    }
}
