//! Record store abstraction.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::submission::{NewSubmission, Submission};

/// Durable, ordered list of submissions.
///
/// Implementations must serialise mutating calls so that two concurrent
/// appends never lose each other's record. Readers observe the last fully
/// committed state.
#[async_trait]
pub trait SubmissionStore: Send + Sync + 'static {
    /// Stamp `submission` with a fresh id and timestamp, persist it after all
    /// existing records, and return the stored record.
    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    /// Remove the record with `id`. `Ok(false)` means no such record existed
    /// and nothing was written.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;

    /// Every persisted record in insertion order. An absent store is empty.
    async fn load_all(&self) -> Result<Vec<Submission>, StoreError>;
}
