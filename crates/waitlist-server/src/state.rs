use std::sync::Arc;

use waitlist_core::{config::Config, store::SubmissionStore};

use crate::auth::{AdminGate, CredentialSource, FileCredentialSource};

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// Holds no durable data: every request goes to the store.
pub struct AppState {
    /// The record store. Serialises its own mutations.
    pub store: Arc<dyn SubmissionStore>,

    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,

    /// Credential check for the admin routes.
    pub gate: AdminGate,
}

impl AppState {
    /// Production wiring: credentials are read from `config.admin_config_path`.
    pub fn new(store: Arc<dyn SubmissionStore>, config: Config) -> Self {
        let source = Arc::new(FileCredentialSource::new(&config.admin_config_path));
        Self::with_credentials(store, config, source)
    }

    pub fn with_credentials(
        store: Arc<dyn SubmissionStore>,
        config: Config,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            gate: AdminGate::new(credentials),
        }
    }
}
