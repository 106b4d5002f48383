// Host health models: probe readings and the persisted snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Downtime is not tracked; every reading reports zero.
pub const SYSTEM_DOWNTIME_SECS: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of one reachability probe. Wire shape of GET /health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reachability {
    pub status: HealthStatus,
    pub details: String,
}

impl Reachability {
    pub fn healthy(details: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            details: details.into(),
        }
    }

    pub fn unhealthy(details: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            details: details.into(),
        }
    }
}

/// Byte counters summed across all interfaces. Wire shape of GET /speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub traffic_in: u64,
    pub traffic_out: u64,
}

/// Wire shape of GET /time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UptimeDowntime {
    pub uptime: f64,
    pub downtime: f64,
}

/// One row of the `system_health` collection. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
    pub system_uptime: f64,
    pub system_downtime: f64,
    pub network_traffic_in: u64,
    pub network_traffic_out: u64,
    pub health_check_status: HealthStatus,
    pub health_check_details: String,
}

impl HealthSnapshot {
    pub fn new(
        captured_at: DateTime<Utc>,
        uptime_secs: f64,
        traffic: TrafficTotals,
        reachability: Reachability,
    ) -> Self {
        Self {
            captured_at,
            system_uptime: uptime_secs.max(0.0),
            system_downtime: SYSTEM_DOWNTIME_SECS,
            network_traffic_in: traffic.traffic_in,
            network_traffic_out: traffic.traffic_out,
            health_check_status: reachability.status,
            health_check_details: reachability.details,
        }
    }
}
