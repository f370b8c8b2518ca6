use tracing::{debug, info};

use waitlist_core::error::StoreError;
use waitlist_core::submission::{NewSubmission, Submission};

use crate::JsonFileStore;

impl JsonFileStore {
    pub async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut submissions = self.read_document().await?;
        let stored = submission.stamp();
        submissions.push(stored.clone());
        self.write_document(&submissions).await?;
        debug!(id = %stored.id, kind = stored.payload.kind(), "Submission appended");
        Ok(stored)
    }

    /// Returns `Ok(false)` without touching the document when `id` is unknown.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut submissions = self.read_document().await?;
        let before = submissions.len();
        submissions.retain(|s| s.id != id);
        if submissions.len() == before {
            return Ok(false);
        }
        self.write_document(&submissions).await?;
        info!(id, removed = before - submissions.len(), "Submission deleted");
        Ok(true)
    }

    pub async fn load_all(&self) -> Result<Vec<Submission>, StoreError> {
        self.read_document().await
    }
}
