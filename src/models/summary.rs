// Aggregate views over the request-log and blocked-request collections

use serde::{Deserialize, Serialize};

/// Instantaneous utilisation, both in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerUsage {
    pub cpu_usage: f64,
    pub memory_usage: f64,
}

/// Wire shape of GET /top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_requests: u64,
    pub blocked_requests: u64,
    pub server_usage: ServerUsage,
    pub blocked_ips: Vec<String>,
}

/// Wire shape of GET /graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub total_requests: u64,
    pub blocked_requests: u64,
}
