use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::store::{Document, RecordStore, StoredLog};
use crate::models::LogId;

/// In-process record store kept in insertion order.
///
/// Same semantics as the Postgres store; used by tests and by
/// `TRAVEL_LOG_STORE=memory` runs.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<StoredLog>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, document: Document) -> Result<LogId, DatabaseError> {
        let id = LogId::generate();
        self.records.write().await.push(StoredLog { id, document });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredLog>, DatabaseError> {
        Ok(self.records.read().await.clone())
    }

    async fn delete(&self, id: LogId) -> Result<u64, DatabaseError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok((before - records.len()) as u64)
    }

    async fn update(&self, id: LogId, fields: Document) -> Result<u64, DatabaseError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.document.extend(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
