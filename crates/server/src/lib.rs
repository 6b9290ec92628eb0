pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_util;

use std::net::SocketAddr;
use std::sync::Arc;

use utoipa_scalar::{Scalar, Servable};

pub use api::create_router;
pub use config::{Config, Environment};
pub use db::create_pool;
pub use error::{AppError, AppResult};
pub use state::AppState;

use feed::FeedClient;
use services::{spawn_periodic_job, FeedFetchJob, IngestService};

pub async fn run_server(addr: SocketAddr, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Ensure the data directory exists
    std::fs::create_dir_all(&config.data_path)?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(pool.clone(), config.clone());

    let ingest = Arc::new(IngestService::new(
        pool,
        Arc::new(FeedClient::new()),
        config.fetch_concurrency,
    ));
    let fetch_job = FeedFetchJob::new(ingest, config.fetch_interval);
    let fetch_handle = spawn_periodic_job(fetch_job);

    tracing::info!(
        "Ingesting up to {} feeds every {:?}",
        config.fetch_concurrency,
        config.fetch_interval
    );

    let (router, api) = create_router(state);
    let app = router.merge(Scalar::with_url("/docs", api));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let the scheduler wind down before the process exits
    fetch_handle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
