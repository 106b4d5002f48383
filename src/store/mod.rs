// Document store contract: insert / count / distinct / find over named collections.

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Health snapshots written by the sampler.
    SystemHealth,
    /// Request logs written by the gateway.
    Logs,
    /// Blocked requests written by the gateway.
    BlockedRequests,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::SystemHealth,
        Collection::Logs,
        Collection::BlockedRequests,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::SystemHealth => "system_health",
            Collection::Logs => "logs",
            Collection::BlockedRequests => "blocked_requests",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("{collection}: documents must be JSON objects")]
    NotAnObject { collection: Collection },

    #[error("invalid field name {0:?}")]
    InvalidField(String),
}

/// Shared by the sampler (writes) and the query service (reads).
/// Each call is atomic on its own; callers never chain read-modify-write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: Collection, document: &Value) -> Result<(), StoreError>;

    /// All-or-nothing batch insert.
    async fn insert_many(
        &self,
        collection: Collection,
        documents: &[Value],
    ) -> Result<(), StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Distinct non-null values of a top-level field, in no particular order.
    async fn distinct(&self, collection: Collection, field: &str)
    -> Result<Vec<Value>, StoreError>;

    /// Up to `limit` documents in insertion order.
    async fn find(&self, collection: Collection, limit: u32) -> Result<Vec<Value>, StoreError>;
}

/// Top-level field names only: letters, digits and underscore.
pub(crate) fn json_path(field: &str) -> Result<String, StoreError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StoreError::InvalidField(field.to_string()));
    }
    Ok(format!("$.{}", field))
}
