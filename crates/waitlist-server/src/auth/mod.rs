//! Admin Gate: HTTP Basic credentials checked against a config file that is
//! re-read on every request.

pub mod basic;
pub mod credentials;
pub mod gate;
pub mod middleware;

pub use basic::{AuthError, BasicCredentials};
pub use credentials::{
    AdminCredentials, ConfigError, CredentialSource, FileCredentialSource, StaticCredentialSource,
};
pub use gate::{AdminGate, GateRejection};
