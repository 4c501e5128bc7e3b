//! Testimony entity - a publicly submitted testimony awaiting review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of a testimony. New submissions always start as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestimonyStatus {
    #[default]
    New,
    Approved,
    Rejected,
}

/// A testimony submitted through the public endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    /// Unique identifier
    pub id: Uuid,

    /// Submitter's full name
    pub full_name: String,

    /// Contact phone number
    pub phone: String,

    /// Topic of the testimony
    pub topic: String,

    /// Review status
    pub status: TestimonyStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted by the public submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimony {
    pub full_name: String,
    pub phone: String,
    pub topic: String,
}

impl Testimony {
    /// Create a new testimony from a submission payload.
    pub fn new(dto: CreateTestimony) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: dto.full_name,
            phone: dto.phone,
            topic: dto.topic,
            status: TestimonyStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}
