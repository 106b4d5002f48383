// Shared test helpers: simulated probe, in-memory store, seeded SQLite

#![allow(dead_code)]

use async_trait::async_trait;
use hostwatch::models::*;
use hostwatch::probe::HostProbe;
use hostwatch::store::{Collection, DocumentStore, SqliteStore, StoreError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::time::{Duration, Instant};

/// Probe returning fixed readings.
pub struct StaticProbe {
    pub uptime: f64,
    pub traffic: TrafficTotals,
    pub reachability: Reachability,
    pub usage: ServerUsage,
    pub reachability_calls: AtomicUsize,
}

impl StaticProbe {
    pub fn healthy() -> Self {
        Self {
            uptime: 1234.5,
            traffic: TrafficTotals {
                traffic_in: 1000,
                traffic_out: 2000,
            },
            reachability: Reachability::healthy("1 packets transmitted, 1 received"),
            usage: ServerUsage {
                cpu_usage: 12.5,
                memory_usage: 40.0,
            },
            reachability_calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachability: Reachability::unhealthy("Command 'ping' returned non-zero exit status 1."),
            ..Self::healthy()
        }
    }
}

#[async_trait]
impl HostProbe for StaticProbe {
    fn sample_uptime(&self) -> f64 {
        self.uptime
    }

    async fn sample_traffic(&self) -> TrafficTotals {
        self.traffic
    }

    async fn check_reachability(&self) -> Reachability {
        self.reachability_calls.fetch_add(1, Ordering::SeqCst);
        self.reachability.clone()
    }

    async fn sample_usage(&self) -> ServerUsage {
        self.usage
    }
}

/// In-memory document store recording every insert attempt.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<Collection, Vec<Value>>>,
    insert_attempts: Mutex<Vec<Instant>>,
    /// Number of upcoming inserts that fail.
    failing_inserts: AtomicUsize,
    failing_reads: AtomicBool,
    insert_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn fail_next_inserts(&self, n: usize) {
        self.failing_inserts.store(n, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.failing_reads.store(true, Ordering::SeqCst);
    }

    pub fn delay_inserts(&self, delay: Duration) {
        *self.insert_delay.lock().unwrap() = Some(delay);
    }

    pub fn insert_attempts(&self) -> Vec<Instant> {
        self.insert_attempts.lock().unwrap().clone()
    }

    pub fn documents(&self, collection: Collection) -> Vec<Value> {
        self.docs
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn read_guard(&self) -> Result<(), StoreError> {
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: &Value) -> Result<(), StoreError> {
        self.insert_attempts.lock().unwrap().push(Instant::now());
        let delay = *self.insert_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let should_fail = self
            .failing_inserts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.docs
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document.clone());
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: &[Value],
    ) -> Result<(), StoreError> {
        for document in documents {
            self.insert(collection, document).await?;
        }
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.read_guard()?;
        Ok(self.documents(collection).len() as u64)
    }

    async fn distinct(
        &self,
        collection: Collection,
        field: &str,
    ) -> Result<Vec<Value>, StoreError> {
        self.read_guard()?;
        let mut out: Vec<Value> = Vec::new();
        for doc in self.documents(collection) {
            if let Some(v) = doc.get(field).filter(|v| !v.is_null())
                && !out.contains(v)
            {
                out.push(v.clone());
            }
        }
        Ok(out)
    }

    async fn find(&self, collection: Collection, limit: u32) -> Result<Vec<Value>, StoreError> {
        self.read_guard()?;
        Ok(self
            .documents(collection)
            .into_iter()
            .take(limit as usize)
            .collect())
    }
}

/// A request-log document as the gateway writes it.
pub fn request_log(ip: &str, path: &str) -> Value {
    json!({
        "timestamp": "2024-09-01T12:00:00Z",
        "ipAddress": ip,
        "userAgent": "Mozilla/5.0",
        "geoLocation": "New York, USA",
        "httpHeaders": "{}",
        "urlPath": path,
        "queryParameters": "{}",
        "connectionDuration": "12ms",
        "referrer": "",
        "cookies": "[]",
        "protocolType": "http",
        "portNumber": "8080",
        "trafficVolume": 512,
        "sessionId": "",
        "requestMethod": "GET",
        "responseTime": 12,
        "statusCode": 200,
        "requestPayloadSize": 0,
    })
}

pub fn blocked_request(ip: &str) -> Value {
    serde_json::to_value(BlockedRequestRecord {
        reason: Some("IP blacklisted".into()),
        ..BlockedRequestRecord::new(ip)
    })
    .unwrap()
}

/// Fresh SQLite store in a temp dir. Keep the `TempDir` alive for the test's duration.
pub async fn sqlite_store() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hostwatch.db");
    let store = SqliteStore::connect(path.to_str().unwrap(), 2)
        .await
        .unwrap();
    store.init().await.unwrap();
    (dir, store)
}

pub async fn seed_logs(store: &dyn DocumentStore, n: usize) {
    let docs: Vec<Value> = (0..n)
        .map(|i| request_log(&format!("192.168.0.{}", i % 250), &format!("/page/{}", i)))
        .collect();
    store.insert_many(Collection::Logs, &docs).await.unwrap();
}
