//! Data access traits implemented by the storage layer.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Testimony;

/// Persistence operations for testimonies.
#[async_trait]
pub trait TestimonyRepository: Send + Sync {
    async fn create(&self, testimony: &Testimony) -> Result<()>;

    async fn get(&self, id: &Uuid) -> Result<Option<Testimony>>;

    async fn list(&self) -> Result<Vec<Testimony>>;
}
