use tracing::info;

use waitlist_core::error::StoreError;
use waitlist_core::submission::new_submission_id;

use crate::JsonFileStore;

impl JsonFileStore {
    /// Give every record without an `id` a fresh one.
    ///
    /// Run once at startup, before the HTTP listener is bound. Writes only
    /// when at least one record changed, so a second run is a no-op.
    /// Returns the number of repaired records.
    pub async fn backfill_missing_ids(&self) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut submissions = self.read_document().await?;

        let mut repaired = 0;
        for submission in submissions.iter_mut().filter(|s| s.id.trim().is_empty()) {
            submission.id = new_submission_id();
            repaired += 1;
        }

        if repaired > 0 {
            self.write_document(&submissions).await?;
            info!(repaired, "Migrated data: added missing ids to submissions");
        }
        Ok(repaired)
    }
}
