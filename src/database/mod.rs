pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::{Document, RecordStore, StoredLog};

use std::sync::Arc;

use crate::config::{DatabaseConfig, StoreBackend};

/// Open the record store selected by configuration
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn RecordStore>, DatabaseError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on shutdown");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(config).await?;
            let store = PgRecordStore::new(pool, &config.collection)?;
            store.ensure_collection().await?;
            Ok(Arc::new(store))
        }
    }
}
