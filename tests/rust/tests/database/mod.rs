//! Repository and statement-logging tests against an in-memory database.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use testimonia_core::{TestimonyRepository, TestimonyStatus};
use testimonia_storage::{Database, SqliteTestimonyRepository};
use tests::{fixtures, LogCapture, TestDatabase};
use tokio::sync::Mutex;
use uuid::Uuid;

fn repository() -> SqliteTestimonyRepository {
    let db = TestDatabase::new();
    SqliteTestimonyRepository::new(Arc::new(Mutex::new(db.db)))
}

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let repo = repository();
    let testimony = fixtures::test_testimony("Ada Lovelace");

    repo.create(&testimony).await.unwrap();
    let found = repo.get(&testimony.id).await.unwrap().expect("testimony exists");

    assert_eq!(found.id, testimony.id);
    assert_eq!(found.full_name, "Ada Lovelace");
    assert_eq!(found.phone, testimony.phone);
    assert_eq!(found.topic, testimony.topic);
    assert_eq!(found.status, TestimonyStatus::New);
    assert_eq!(found.created_at, testimony.created_at);
    assert_eq!(found.updated_at, testimony.updated_at);
}

#[tokio::test]
async fn test_get_unknown_id_returns_none() {
    let repo = repository();

    let found = repo.get(&Uuid::new_v4()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let repo = repository();

    let mut older = fixtures::test_testimony("First Submitter");
    older.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    older.updated_at = older.created_at;

    let mut newer = fixtures::test_testimony("Second Submitter");
    newer.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    newer.updated_at = newer.created_at;

    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let listed = repo.list().await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].full_name, "Second Submitter");
    assert_eq!(listed[1].full_name, "First Submitter");
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let repo = repository();
    let testimony = fixtures::test_testimony("Ada Lovelace");

    repo.create(&testimony).await.unwrap();
    let result = repo.create(&testimony).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_statement_logging_emits_highlighted_sql() {
    let (capture, _guard) = LogCapture::install();

    let mut db = Database::open_in_memory().unwrap();
    db.enable_statement_logging();
    let repo = SqliteTestimonyRepository::new(Arc::new(Mutex::new(db)));

    repo.create(&fixtures::test_testimony("Ada Lovelace"))
        .await
        .unwrap();
    repo.list().await.unwrap();

    // Each token gets its own color span, so assert on ANSI-stripped lines.
    let lines = capture.lines();
    assert!(lines.iter().any(|l| l.contains("INSERT INTO testimonies")));
    assert!(lines
        .iter()
        .any(|l| l.contains("SELECT") && l.contains("ORDER BY created_at DESC")));
}

#[tokio::test]
async fn test_statement_logging_is_off_by_default() {
    let (capture, _guard) = LogCapture::install();

    let repo = repository();
    repo.create(&fixtures::test_testimony("Ada Lovelace"))
        .await
        .unwrap();

    assert!(!capture.contents().contains("INSERT INTO testimonies"));
}
