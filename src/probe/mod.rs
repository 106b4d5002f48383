// Host metrics probe: uptime, interface traffic, reachability, CPU/memory usage

mod net_dev;
mod reachability;

pub use net_dev::parse_net_dev;
pub use reachability::ReachabilityProbe;

use crate::config::ProbeConfig;
use crate::models::{Reachability, ServerUsage, TrafficTotals};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use sysinfo::System;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("reading counters: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed counter {value:?} on line {line}")]
    MalformedCounter { line: usize, value: String },
}

/// Measurements the sampler and the query service take from the host.
///
/// Implementations absorb their own failures into degraded readings
/// (zero traffic, `Unhealthy`, zero usage); nothing here returns an error.
#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Seconds since boot.
    fn sample_uptime(&self) -> f64;

    async fn sample_traffic(&self) -> TrafficTotals;

    async fn check_reachability(&self) -> Reachability;

    async fn sample_usage(&self) -> ServerUsage;
}

pub struct SysProbe {
    boot_time: u64,
    net_dev_path: PathBuf,
    reachability: ReachabilityProbe,
    cpu_window: Duration,
}

impl SysProbe {
    /// Fails when the OS does not report a boot time; the service cannot run without it.
    pub fn new(config: &ProbeConfig) -> anyhow::Result<Self> {
        let boot_time = System::boot_time();
        anyhow::ensure!(boot_time > 0, "OS boot time is unavailable");
        Ok(Self {
            boot_time,
            net_dev_path: PathBuf::from(&config.net_dev_path),
            reachability: ReachabilityProbe::ping(
                &config.reachability_target,
                Duration::from_secs(config.ping_timeout_secs),
            ),
            cpu_window: Duration::from_millis(config.cpu_sample_window_ms),
        })
    }

    pub fn boot_time(&self) -> u64 {
        self.boot_time
    }
}

#[async_trait]
impl HostProbe for SysProbe {
    fn sample_uptime(&self) -> f64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        (now - self.boot_time as f64).max(0.0)
    }

    #[instrument(skip(self), fields(repo = "probe", operation = "sample_traffic"))]
    async fn sample_traffic(&self) -> TrafficTotals {
        match net_dev::read_net_dev(&self.net_dev_path).await {
            Ok(totals) => totals,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.net_dev_path.display(),
                    "network traffic read failed"
                );
                TrafficTotals::default()
            }
        }
    }

    async fn check_reachability(&self) -> Reachability {
        self.reachability.check().await
    }

    /// Blocks a worker thread for the CPU window: usage is the delta between two refreshes.
    /// Each call measures on its own `System`, so concurrent callers overlap their windows.
    #[instrument(skip(self), fields(repo = "probe", operation = "sample_usage"))]
    async fn sample_usage(&self) -> ServerUsage {
        let window = self.cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        let result = tokio::task::spawn_blocking(move || {
            let mut sys = System::new();
            sys.refresh_cpu_usage();
            std::thread::sleep(window);
            sys.refresh_cpu_usage();
            sys.refresh_memory();

            let total = sys.total_memory();
            let used = total.saturating_sub(sys.available_memory());
            let memory_usage = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            ServerUsage {
                cpu_usage: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                memory_usage,
            }
        })
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "server usage sample failed");
            ServerUsage::default()
        })
    }
}
