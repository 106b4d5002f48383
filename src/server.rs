// Service lifecycle: serve HTTP until a shutdown signal, then stop the sampler and close the store.

use crate::sampler::SamplerHandle;
use crate::store::SqliteStore;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;

/// Runs `app` until `signal` resolves or the server fails.
///
/// The sampler is stopped and the pool closed on both paths; a server error is
/// returned only after that.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    sampler: SamplerHandle,
    store: &SqliteStore,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let served = tokio::select! {
        result = axum::serve(listener, app) => result.map_err(anyhow::Error::from),
        _ = signal => {
            tracing::info!("Received shutdown signal");
            Ok(())
        }
    };
    if let Err(e) = &served {
        tracing::error!(error = %e, "HTTP server stopped");
    }

    sampler.stop().await;
    store.close().await;
    tracing::info!("Shutdown complete");
    served
}
