// Aggregate query service. Stateless: every call re-reads the store or re-probes the host.

use crate::models::{
    GraphData, Reachability, RequestLogRecord, SYSTEM_DOWNTIME_SECS, Summary, TrafficTotals,
    UptimeDowntime,
};
use crate::probe::HostProbe;
use crate::store::{Collection, DocumentStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Field of a blocked-request document holding the client address.
pub const BLOCKED_IP_FIELD: &str = "ipAddress";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct QueryService {
    store: Arc<dyn DocumentStore>,
    probe: Arc<dyn HostProbe>,
    logs_limit: u32,
}

impl QueryService {
    pub fn new(store: Arc<dyn DocumentStore>, probe: Arc<dyn HostProbe>, logs_limit: u32) -> Self {
        Self {
            store,
            probe,
            logs_limit,
        }
    }

    /// Live reachability check, independent of the sampler's last snapshot.
    pub async fn health(&self) -> Reachability {
        self.probe.check_reachability().await
    }

    pub async fn speed(&self) -> TrafficTotals {
        self.probe.sample_traffic().await
    }

    pub fn uptime_downtime(&self) -> UptimeDowntime {
        UptimeDowntime {
            uptime: self.probe.sample_uptime(),
            downtime: SYSTEM_DOWNTIME_SECS,
        }
    }

    /// Up to `logs_limit` request logs in insertion order.
    /// An empty collection is reported as `NotFound`, not as an empty list.
    pub async fn list_logs(&self) -> Result<Vec<RequestLogRecord>, QueryError> {
        let documents = self.store.find(Collection::Logs, self.logs_limit).await?;
        if documents.is_empty() {
            return Err(QueryError::NotFound("No logs found"));
        }
        let mut logs = Vec::with_capacity(documents.len());
        for document in documents {
            logs.push(serde_json::from_value(document).map_err(StoreError::from)?);
        }
        Ok(logs)
    }

    /// Counts, distinct blocked IPs and live usage, gathered concurrently.
    /// The counts are not a consistent snapshot of each other.
    pub async fn summary(&self) -> Result<Summary, QueryError> {
        let (total, blocked, ips, server_usage) = tokio::join!(
            self.store.count(Collection::Logs),
            self.store.count(Collection::BlockedRequests),
            self.store
                .distinct(Collection::BlockedRequests, BLOCKED_IP_FIELD),
            self.probe.sample_usage(),
        );
        Ok(Summary {
            total_requests: total?,
            blocked_requests: blocked?,
            server_usage,
            blocked_ips: ips?.into_iter().map(ip_string).collect(),
        })
    }

    pub async fn graph_data(&self) -> Result<GraphData, QueryError> {
        let (total_requests, blocked_requests) = tokio::try_join!(
            self.store.count(Collection::Logs),
            self.store.count(Collection::BlockedRequests),
        )?;
        Ok(GraphData {
            total_requests,
            blocked_requests,
        })
    }
}

fn ip_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
