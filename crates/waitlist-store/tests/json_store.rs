use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use waitlist_core::error::StoreError;
use waitlist_core::store::SubmissionStore;
use waitlist_core::submission::{NewSubmission, Payload};
use waitlist_store::JsonFileStore;

fn temp_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::open(dir.path().join("submissions.json"));
    (dir, store)
}

fn join(email: &str, visitor: &str) -> NewSubmission {
    NewSubmission::join(Some(email.to_string()), true, Some(visitor.to_string()), None)
        .expect("valid join")
}

fn read_raw(store: &JsonFileStore) -> Value {
    let bytes = std::fs::read(store.path()).expect("read document");
    serde_json::from_slice(&bytes).expect("document is JSON")
}

#[tokio::test]
async fn absent_document_loads_as_empty() {
    let (_dir, store) = temp_store();
    let all = store.load_all().await.expect("load");
    assert!(all.is_empty());
    assert!(!store.path().exists(), "loading must not create the document");
}

#[tokio::test]
async fn empty_file_loads_as_empty() {
    let (_dir, store) = temp_store();
    std::fs::write(store.path(), "").expect("write empty file");
    assert!(store.load_all().await.expect("load").is_empty());
}

#[tokio::test]
async fn malformed_document_is_reported_distinctly() {
    let (_dir, store) = temp_store();
    std::fs::write(store.path(), "{ not json").expect("write garbage");

    let err = store.load_all().await.expect_err("malformed document");
    assert!(matches!(err, StoreError::Malformed(_)), "got {err:?}");

    let err = store
        .append(NewSubmission::visit(Some("v1".into()), None))
        .await
        .expect_err("append on malformed document");
    assert!(matches!(err, StoreError::Malformed(_)));
    assert_eq!(
        std::fs::read_to_string(store.path()).expect("read"),
        "{ not json",
        "failed append must leave the document untouched"
    );
}

#[tokio::test]
async fn write_failure_is_io_error_and_keeps_document() {
    let (dir, store) = temp_store();
    let kept = store.append(join("a@x.com", "v1")).await.expect("append");
    let before = std::fs::read_to_string(store.path()).expect("read");

    // Occupy the temp-file slot so the write step fails.
    let tmp_slot = dir.path().join("submissions.tmp");
    std::fs::create_dir_all(&tmp_slot).expect("block temp path");

    let err = store
        .append(join("b@x.com", "v2"))
        .await
        .expect_err("write must fail");
    assert!(matches!(err, StoreError::Io(_)), "got {err:?}");

    let err = store.delete_by_id(&kept.id).await.expect_err("delete must fail");
    assert!(matches!(err, StoreError::Io(_)), "got {err:?}");

    assert_eq!(std::fs::read_to_string(store.path()).expect("read"), before);
    assert_eq!(store.load_all().await.expect("load"), vec![kept]);
    assert!(tmp_slot.is_dir(), "the blocking directory is not ours to remove");
}

#[tokio::test]
async fn append_round_trips_with_unique_ids() {
    let (_dir, store) = temp_store();
    for i in 0..5 {
        store
            .append(NewSubmission::visit(Some(format!("v{i}")), Some("agent".into())))
            .await
            .expect("append visit");
    }
    store.append(join("a@x.com", "v0")).await.expect("append join");

    let all = store.load_all().await.expect("load");
    assert_eq!(all.len(), 6);

    let ids: HashSet<&str> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 6, "ids must be unique");
    assert!(all.iter().all(|s| !s.id.is_empty()));
    assert_eq!(all[0].visitor_id.as_deref(), Some("v0"));
    assert!(matches!(all[5].payload, Payload::Join { .. }));
}

#[tokio::test]
async fn append_returns_the_stored_record() {
    let (_dir, store) = temp_store();
    let stored = store.append(join("a@x.com", "v1")).await.expect("append");
    let all = store.load_all().await.expect("load");
    assert_eq!(all, vec![stored]);
}

#[tokio::test]
async fn document_uses_flat_camel_case_records() {
    let (_dir, store) = temp_store();
    store.append(join("a@x.com", "v1")).await.expect("append");

    let raw = read_raw(&store);
    let record = &raw[0];
    assert_eq!(record["type"], "join");
    assert_eq!(record["email"], "a@x.com");
    assert_eq!(record["apiAccess"], true);
    assert_eq!(record["visitorId"], "v1");
    assert!(record["id"].is_string());
    assert!(record["timestamp"].is_string());
}

#[tokio::test]
async fn delete_twice_is_success_then_not_found() {
    let (_dir, store) = temp_store();
    let keep = store.append(join("a@x.com", "v1")).await.expect("append");
    let doomed = store.append(join("b@x.com", "v2")).await.expect("append");

    assert!(store.delete_by_id(&doomed.id).await.expect("first delete"));
    assert!(!store.delete_by_id(&doomed.id).await.expect("second delete"));

    let all = store.load_all().await.expect("load");
    assert_eq!(all, vec![keep]);
}

#[tokio::test]
async fn delete_unknown_id_does_not_create_document() {
    let (_dir, store) = temp_store();
    assert!(!store.delete_by_id("missing").await.expect("delete"));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn concurrent_appends_are_not_lost() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .append(NewSubmission::visit(Some(format!("v{i}")), None))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("append");
    }

    assert_eq!(store.load_all().await.expect("load").len(), 32);
}

#[tokio::test]
async fn trait_object_dispatches_to_file_store() {
    let (_dir, store) = temp_store();
    let store: Arc<dyn SubmissionStore> = Arc::new(store);
    let stored = store
        .append(NewSubmission::feedback(Some("love it".into()), None).expect("valid"))
        .await
        .expect("append");
    assert!(store.delete_by_id(&stored.id).await.expect("delete"));
    assert!(store.load_all().await.expect("load").is_empty());
}

#[tokio::test]
async fn parent_directory_is_created_on_first_write() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::open(dir.path().join("nested/data/submissions.json"));
    store
        .append(NewSubmission::visit(None, None))
        .await
        .expect("append");
    assert!(store.path().exists());
}

// ============================================================
// Maintenance pass
// ============================================================

#[tokio::test]
async fn backfill_assigns_missing_ids_once() {
    let (_dir, store) = temp_store();
    let legacy = json!([
        { "type": "visit", "visitorId": "v1", "userAgent": "old", "timestamp": "2024-01-01T00:00:00.000Z" },
        { "id": "keep-me", "type": "join", "email": "a@x.com", "apiAccess": false, "visitorId": "v1", "timestamp": "2024-01-02T00:00:00.000Z" },
        { "type": "feedback", "content": "hi", "timestamp": "2024-01-03T00:00:00.000Z" }
    ]);
    std::fs::write(store.path(), legacy.to_string()).expect("seed legacy document");

    assert_eq!(store.backfill_missing_ids().await.expect("backfill"), 2);

    let all = store.load_all().await.expect("load");
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].id, "keep-me");
    assert!(all.iter().all(|s| !s.id.is_empty()));
    let ids: HashSet<&str> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 3);

    let modified = std::fs::metadata(store.path())
        .and_then(|m| m.modified())
        .expect("mtime");
    assert_eq!(store.backfill_missing_ids().await.expect("second run"), 0);
    let modified_again = std::fs::metadata(store.path())
        .and_then(|m| m.modified())
        .expect("mtime");
    assert_eq!(modified, modified_again, "idempotent run must not rewrite");
    assert_eq!(store.load_all().await.expect("reload"), all);
}

#[tokio::test]
async fn backfill_on_absent_document_is_a_no_op() {
    let (_dir, store) = temp_store();
    assert_eq!(store.backfill_missing_ids().await.expect("backfill"), 0);
    assert!(!store.path().exists());
}
