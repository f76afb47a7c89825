//! Seam to the primary record store.
//!
//! Persistence is a collaborator, not part of this crate: the engine reads
//! person records and writes exactly one field back (`external_id`).
//! `MemoryRecordStore` ships here for tests and application wiring.

use crate::error::{SyncError, SyncResult};
use crate::types::LocalRecord;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Read/write access the sync engine needs from the primary store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches one record by id, soft-deleted records included.
    async fn get(&self, id: Uuid) -> SyncResult<Option<LocalRecord>>;

    /// All non-deleted records in stable creation order.
    async fn list_active(&self) -> SyncResult<Vec<LocalRecord>>;

    async fn insert(&self, record: LocalRecord) -> SyncResult<()>;

    /// Writes the correlation field. The only mutation the engine performs
    /// on existing records.
    async fn set_external_id(
        &self,
        id: Uuid,
        external_id: Option<&str>,
    ) -> SyncResult<()>;
}

/// In-memory, insertion-ordered record store.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<LocalRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, id: Uuid) -> SyncResult<Option<LocalRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_active(&self) -> SyncResult<Vec<LocalRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| !r.is_deleted())
            .cloned()
            .collect())
    }

    async fn insert(&self, record: LocalRecord) -> SyncResult<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(SyncError::Store(format!(
                "duplicate record id {}",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    async fn set_external_id(
        &self,
        id: Uuid,
        external_id: Option<&str>,
    ) -> SyncResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SyncError::NotFound(id))?;
        record.external_id = external_id.map(str::to_string);
        Ok(())
    }
}
