use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::manager::DatabaseError;
use crate::models::LogId;

/// Schemaless document body as held by the store
pub type Document = Map<String, Value>;

/// A persisted travel log: its identifier plus the stored fields
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLog {
    pub id: LogId,
    pub document: Document,
}

impl StoredLog {
    /// Client representation: the stored fields with `_id` added
    pub fn into_value(self) -> Value {
        let mut document = self.document;
        document.insert("_id".to_string(), Value::String(self.id.to_string()));
        Value::Object(document)
    }
}

/// The persistent travel log collection.
///
/// Implementations own identity assignment and their own concurrency; callers
/// hold no locks. Deleting or updating an absent id is not an error, the
/// returned count is simply zero.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new document and return the identifier assigned to it
    async fn insert(&self, document: Document) -> Result<LogId, DatabaseError>;

    /// Every stored record in store order
    async fn find_all(&self) -> Result<Vec<StoredLog>, DatabaseError>;

    async fn delete(&self, id: LogId) -> Result<u64, DatabaseError>;

    /// Set each given field on the record, leaving other fields untouched
    async fn update(&self, id: LogId, fields: Document) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
