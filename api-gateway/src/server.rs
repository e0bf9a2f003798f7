//! Listener lifecycle: bind, serve, drain, close the pool.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use shared::{HttpConfig, PgStorage};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Serve `app` until `shutdown` resolves, then drain in-flight requests for at
/// most `config.shutdown_grace` and close the storage pool.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    storage: Arc<PgStorage>,
    config: &HttpConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stopped_tx, stopped_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        info!("stopped accepting new connections");
        let _ = stopped_tx.send(());
    });
    let mut server = tokio::spawn(async move { server.await });

    let result = tokio::select! {
        joined = &mut server => Some(joined),
        _ = stopped_rx => None,
    };

    let served = match result {
        Some(joined) => joined.context("server task panicked")?,
        None => match tokio::time::timeout(config.shutdown_grace, &mut server).await {
            Ok(joined) => {
                info!("in-flight requests drained");
                joined.context("server task panicked")?
            }
            Err(_) => {
                warn!(
                    grace_secs = config.shutdown_grace.as_secs(),
                    "drain window elapsed, aborting remaining connections"
                );
                server.abort();
                Ok(())
            }
        },
    };

    storage.close().await;
    info!("postgres connection pool closed");

    served.map_err(|e| {
        error!(error = %e, "server error");
        anyhow::Error::from(e)
    })
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for SIGINT");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
