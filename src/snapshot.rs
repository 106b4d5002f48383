// Compose one health snapshot from the probe readings.

use crate::models::HealthSnapshot;
use crate::probe::HostProbe;

/// Uptime, traffic, then reachability, stamped with the capture start time.
pub async fn capture(probe: &dyn HostProbe) -> HealthSnapshot {
    let captured_at = chrono::Utc::now();
    let uptime = probe.sample_uptime();
    let traffic = probe.sample_traffic().await;
    let reachability = probe.check_reachability().await;
    HealthSnapshot::new(captured_at, uptime, traffic, reachability)
}
