use thiserror::Error;

/// Failures of the persisted submission document.
///
/// An absent document is not an error: it reads as an empty list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("submission store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("submission store document is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize submissions: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A required field was missing or blank on an incoming submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{message}")]
    MissingField {
        field: &'static str,
        message: &'static str,
    },
}

impl ValidationError {
    /// Wire name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field, .. } => field,
        }
    }
}
