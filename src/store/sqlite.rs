// SQLite-backed document store. One table per collection, one JSON document per row.

use super::{Collection, DocumentStore, StoreError, json_path};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    /// Creates the collection tables if absent. Documents carry no per-field schema.
    pub async fn init(&self) -> anyhow::Result<()> {
        for collection in Collection::ALL {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, data TEXT NOT NULL)",
                collection.name()
            ))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn encode(collection: Collection, document: &Value) -> Result<String, StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject { collection });
        }
        Ok(serde_json::to_string(document)?)
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    #[instrument(skip(self, collection, document), fields(repo = "store", operation = "insert", %collection))]
    async fn insert(&self, collection: Collection, document: &Value) -> Result<(), StoreError> {
        let data = Self::encode(collection, document)?;
        sqlx::query(&format!(
            "INSERT INTO {} (data) VALUES ($1)",
            collection.name()
        ))
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self, collection, documents), fields(repo = "store", operation = "insert_many", %collection, documents_count = documents.len()))]
    async fn insert_many(
        &self,
        collection: Collection,
        documents: &[Value],
    ) -> Result<(), StoreError> {
        if documents.is_empty() {
            return Ok(());
        }
        let sql = format!("INSERT INTO {} (data) VALUES ($1)", collection.name());
        let mut tx = self.pool.begin().await?;
        for document in documents {
            let data = Self::encode(collection, document)?;
            sqlx::query(&sql).bind(data).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, collection), fields(repo = "store", operation = "count", %collection))]
    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", collection.name()))
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n.max(0) as u64)
    }

    #[instrument(skip(self, collection), fields(repo = "store", operation = "distinct", %collection))]
    async fn distinct(
        &self,
        collection: Collection,
        field: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let path = json_path(field)?;
        // `->` yields the JSON text of the value, so 1 and "1" stay distinct.
        let rows = sqlx::query(&format!(
            "SELECT DISTINCT data -> $1 AS value FROM {} WHERE json_type(data, $1) IS NOT NULL AND json_type(data, $1) != 'null'",
            collection.name()
        ))
        .bind(path)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: String = row.try_get("value")?;
            out.push(serde_json::from_str(&raw)?);
        }
        Ok(out)
    }

    #[instrument(skip(self, collection), fields(repo = "store", operation = "find", %collection))]
    async fn find(&self, collection: Collection, limit: u32) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT data FROM {} ORDER BY id ASC LIMIT $1",
            collection.name()
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: String = row.try_get("data")?;
            out.push(serde_json::from_str(&raw)?);
        }
        Ok(out)
    }
}
