// Domain models

mod health;
mod records;
mod summary;

pub use health::{
    HealthSnapshot, HealthStatus, Reachability, SYSTEM_DOWNTIME_SECS, TrafficTotals,
    UptimeDowntime,
};
pub use records::{BlockedRequestRecord, RequestLogRecord};
pub use summary::{GraphData, ServerUsage, Summary};
