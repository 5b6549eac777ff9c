use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::store::{Document, RecordStore, StoredLog};
use crate::models::LogId;

#[derive(Debug, FromRow)]
struct LogRow {
    id: Uuid,
    document: Json<Document>,
}

impl From<LogRow> for StoredLog {
    fn from(row: LogRow) -> Self {
        Self {
            id: LogId::from(row.id),
            document: row.document.0,
        }
    }
}

/// Record store over a single PostgreSQL table of JSONB documents
pub struct PgRecordStore {
    pool: PgPool,
    table: String,
}

impl PgRecordStore {
    /// Bind the store to `collection`, which must be a plain lowercase identifier
    pub fn new(pool: PgPool, collection: &str) -> Result<Self, DatabaseError> {
        if !DatabaseManager::is_valid_collection_name(collection) {
            return Err(DatabaseError::InvalidCollectionName(collection.to_string()));
        }
        Ok(Self {
            pool,
            table: DatabaseManager::quote_identifier(collection),
        })
    }

    /// Create the backing table if it does not exist yet
    pub async fn ensure_collection(&self) -> Result<(), DatabaseError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        info!("Collection {} ready", self.table);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, document: Document) -> Result<LogId, DatabaseError> {
        let id = LogId::generate();
        let sql = format!("INSERT INTO {} (id, document) VALUES ($1, $2)", self.table);
        sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Json(document))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredLog>, DatabaseError> {
        let sql = format!("SELECT id, document FROM {} ORDER BY created_at, id", self.table);
        let rows = sqlx::query_as::<_, LogRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(StoredLog::from).collect())
    }

    async fn delete(&self, id: LogId) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql).bind(id.as_uuid()).execute(&self.pool).await?;
        debug!("Deleted {} row(s) for {}", result.rows_affected(), id);
        Ok(result.rows_affected())
    }

    async fn update(&self, id: LogId, fields: Document) -> Result<u64, DatabaseError> {
        // jsonb || merges top-level keys: submitted fields replace, others stay
        let sql = format!(
            "UPDATE {} SET document = document || $2 WHERE id = $1",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Json(fields))
            .execute(&self.pool)
            .await?;
        debug!("Updated {} row(s) for {}", result.rows_affected(), id);
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
