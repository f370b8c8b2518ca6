use async_trait::async_trait;

use waitlist_core::error::StoreError;
use waitlist_core::store::SubmissionStore;
use waitlist_core::submission::{NewSubmission, Submission};

use crate::JsonFileStore;

#[async_trait]
impl SubmissionStore for JsonFileStore {
    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        JsonFileStore::append(self, submission).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        JsonFileStore::delete_by_id(self, id).await
    }

    async fn load_all(&self) -> Result<Vec<Submission>, StoreError> {
        JsonFileStore::load_all(self).await
    }
}
