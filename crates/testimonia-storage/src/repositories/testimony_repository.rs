//! SQLite implementation of TestimonyRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use testimonia_core::{Testimony, TestimonyRepository, TestimonyStatus};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::Database;

/// SQLite-backed implementation of TestimonyRepository.
pub struct SqliteTestimonyRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteTestimonyRepository {
    /// Create a new SQLite testimony repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Parse a datetime string to DateTime<Utc>.
    /// Handles both RFC3339 format and SQLite's `datetime('now')` format.
    fn parse_datetime(s: &str) -> DateTime<Utc> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.with_timezone(&Utc);
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return dt.and_utc();
        }

        // Fallback to current time
        Utc::now()
    }

    fn status_to_str(status: TestimonyStatus) -> &'static str {
        match status {
            TestimonyStatus::New => "NEW",
            TestimonyStatus::Approved => "APPROVED",
            TestimonyStatus::Rejected => "REJECTED",
        }
    }

    fn status_from_str(s: &str) -> TestimonyStatus {
        match s {
            "APPROVED" => TestimonyStatus::Approved,
            "REJECTED" => TestimonyStatus::Rejected,
            _ => TestimonyStatus::New,
        }
    }

    fn row_to_testimony(row: &Row<'_>) -> rusqlite::Result<Testimony> {
        let id_str: String = row.get(0)?;
        Ok(Testimony {
            id: id_str.parse().unwrap_or_else(|e| {
                tracing::warn!("Failed to parse testimony UUID '{}': {}", id_str, e);
                Uuid::new_v4()
            }),
            full_name: row.get(1)?,
            phone: row.get(2)?,
            topic: row.get(3)?,
            status: Self::status_from_str(&row.get::<_, String>(4)?),
            created_at: Self::parse_datetime(&row.get::<_, String>(5)?),
            updated_at: Self::parse_datetime(&row.get::<_, String>(6)?),
        })
    }
}

#[async_trait]
impl TestimonyRepository for SqliteTestimonyRepository {
    async fn create(&self, testimony: &Testimony) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO testimonies (id, full_name, phone, topic, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                testimony.id.to_string(),
                testimony.full_name,
                testimony.phone,
                testimony.topic,
                Self::status_to_str(testimony.status),
                testimony.created_at.to_rfc3339(),
                testimony.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Testimony>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, full_name, phone, topic, status, created_at, updated_at
             FROM testimonies
             WHERE id = ?1",
        )?;

        let testimony = stmt
            .query_row(params![id.to_string()], Self::row_to_testimony)
            .optional()?;

        Ok(testimony)
    }

    async fn list(&self) -> Result<Vec<Testimony>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, full_name, phone, topic, status, created_at, updated_at
             FROM testimonies
             ORDER BY created_at DESC",
        )?;

        let testimonies = stmt
            .query_map([], Self::row_to_testimony)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(testimonies)
    }
}
