//! Events service - calendar events HTTP API backed by PostgreSQL.

use std::sync::Arc;

use anyhow::Context;
use api_gateway::server::{serve, shutdown_signal};
use api_gateway::telemetry::init_tracing;
use shared::{db, Config, PgStorage};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    init_tracing(config.env);

    info!(env = ?config.env, "starting events service");
    debug!("debug messages are enabled");

    let pool = match db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "failed to init storage");
            return Err(e.into());
        }
    };
    let storage = Arc::new(PgStorage::new(pool));

    let app = api_gateway::app(Arc::clone(&storage), &config.http);

    let listener = TcpListener::bind(config.http.address)
        .await
        .with_context(|| format!("failed to bind {}", config.http.address))?;
    info!(address = %config.http.address, "starting server");

    serve(listener, app, storage, &config.http, shutdown_signal()).await
}
