use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{info, warn};

use waitlist_core::error::StoreError;
use waitlist_core::submission::Submission;

/// A single JSON document holding every submission, in insertion order.
///
/// Every mutation is a whole-document read-modify-write. Mutations are
/// serialised through `write_lock` so concurrent appends cannot overwrite
/// each other. The document is replaced with write-to-temp + rename, so
/// readers never see a half-written file and do not take the lock.
pub struct JsonFileStore {
    pub(crate) path: PathBuf,
    pub(crate) write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Use (or lazily create) the document at `path`. Nothing is read or
    /// written until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(path = %path.display(), "Submission store opened");
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. Absent or zero-byte documents read as empty.
    pub(crate) async fn read_document(&self) -> Result<Vec<Submission>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(StoreError::Malformed)
    }

    /// Replace the document with `submissions`.
    ///
    /// Callers must hold `write_lock`.
    pub(crate) async fn write_document(&self, submissions: &[Submission]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(submissions).map_err(StoreError::Serialize)?;
        replace_file(&self.path, &payload).await?;
        Ok(())
    }
}

/// Write `bytes` to `<path>.tmp` and rename it over `path`.
///
/// On failure the temp file is removed and the previous document is left
/// as it was.
pub(crate) async fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let result = match tokio::fs::write(&tmp_path, bytes).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "Failed to replace submissions document");
        if tokio::fs::metadata(&tmp_path).await.is_ok_and(|m| m.is_file()) {
            let _ = tokio::fs::remove_file(&tmp_path).await;
        }
    }
    result
}
