use anyhow::Result;
use hostwatch::probe::{HostProbe, SysProbe};
use hostwatch::store::{DocumentStore, SqliteStore};
use hostwatch::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let probe: Arc<dyn HostProbe> = Arc::new(SysProbe::new(&app_config.probe)?);
    let sqlite_store = Arc::new(
        SqliteStore::connect(&app_config.database.path, app_config.database.max_pool_size).await?,
    );
    sqlite_store.init().await?;
    let store: Arc<dyn DocumentStore> = sqlite_store.clone();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let sampler_task = sampler::spawn(
        sampler::SamplerDeps {
            probe: probe.clone(),
            store: store.clone(),
            stats: Arc::new(sampler::SamplerStats::default()),
            shutdown_rx,
        },
        sampler::SamplerSettings::from(&app_config.sampler),
    );

    let query = Arc::new(query::QueryService::new(
        store,
        probe,
        app_config.query.logs_limit,
    ));
    let app = routes::app(query);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    server::serve_until(
        listener,
        app,
        shutdown_signal(),
        sampler::SamplerHandle::new(shutdown_tx, sampler_task),
        &sqlite_store,
    )
    .await
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
