// Background health sampler: capture a snapshot, persist it, sleep, repeat.
// Cycles never overlap; shutdown is observed while sleeping, so a write in flight always completes.

use crate::config::SamplerConfig;
use crate::probe::HostProbe;
use crate::snapshot;
use crate::store::{Collection, DocumentStore, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::Instrument;

/// Probe, store and shutdown signal for the sampler.
pub struct SamplerDeps {
    pub probe: Arc<dyn HostProbe>,
    pub store: Arc<dyn DocumentStore>,
    pub stats: Arc<SamplerStats>,
    /// Sending (or dropping the sender) stops the sampler at its next sleep.
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Sampler timing.
#[derive(Debug, Clone, Copy)]
pub struct SamplerSettings {
    pub interval: Duration,
    /// How often to log sampler stats (real time).
    pub stats_log_interval: Duration,
}

impl From<&SamplerConfig> for SamplerSettings {
    fn from(config: &SamplerConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            stats_log_interval: Duration::from_secs(config.stats_log_interval_secs),
        }
    }
}

#[derive(Debug, Default)]
pub struct SamplerStats {
    cycles: AtomicU64,
    snapshots_saved: AtomicU64,
    writes_failed: AtomicU64,
}

impl SamplerStats {
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn snapshots_saved(&self) -> u64 {
        self.snapshots_saved.load(Ordering::Relaxed)
    }

    pub fn writes_failed(&self) -> u64 {
        self.writes_failed.load(Ordering::Relaxed)
    }
}

/// One sample-and-persist step. A failed write is logged and counted, never retried.
pub async fn run_cycle(
    probe: &dyn HostProbe,
    store: &dyn DocumentStore,
    stats: &SamplerStats,
) -> Result<(), StoreError> {
    stats.cycles.fetch_add(1, Ordering::Relaxed);
    let snapshot = snapshot::capture(probe).await;
    let result = match serde_json::to_value(&snapshot) {
        Ok(document) => store.insert(Collection::SystemHealth, &document).await,
        Err(e) => Err(e.into()),
    };
    match &result {
        Ok(()) => {
            stats.snapshots_saved.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                operation = "save_snapshot",
                status = ?snapshot.health_check_status,
                "System health snapshot saved"
            );
        }
        Err(e) => {
            stats.writes_failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                error = %e,
                operation = "save_snapshot",
                "Failed to save system health snapshot"
            );
        }
    }
    result
}

/// A running sampler and the sender that stops it.
pub struct SamplerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    pub fn new(shutdown_tx: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self { shutdown_tx, task }
    }

    /// Signals shutdown and waits for the current cycle to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Sampler task ended abnormally");
        }
    }
}

pub fn spawn(deps: SamplerDeps, settings: SamplerSettings) -> JoinHandle<()> {
    let span = tracing::debug_span!("sampler", interval_secs = settings.interval.as_secs());
    tokio::spawn(run(deps, settings).instrument(span))
}

async fn run(deps: SamplerDeps, settings: SamplerSettings) {
    let SamplerDeps {
        probe,
        store,
        stats,
        mut shutdown_rx,
    } = deps;

    let mut stats_log_tick = interval_at(
        Instant::now() + settings.stats_log_interval,
        settings.stats_log_interval,
    );
    stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let _ = run_cycle(probe.as_ref(), store.as_ref(), &stats).await;

        let sleep = tokio::time::sleep(settings.interval);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => break,
                _ = &mut shutdown_rx => {
                    tracing::debug!("Sampler shutting down");
                    return;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        cycles = stats.cycles(),
                        snapshots_saved_total = stats.snapshots_saved(),
                        writes_failed_total = stats.writes_failed(),
                        "sampler stats"
                    );
                }
            }
        }
    }
}
