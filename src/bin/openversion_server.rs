//! Runs the version server.
//!
//! Configuration is read as described in [`openversion::config`]. When
//! `database_url` is unset, versions are kept in memory and lost on exit.

use mockable::DefaultClock;
use openversion::cancellation::Cancellation;
use openversion::config::ServerConfig;
use openversion::http::{AppState, build_router};
use openversion::telemetry::init_tracing;
use openversion::version::{
    adapters::{
        memory::InMemoryVersionRepository,
        postgres::{PostgresVersionRepository, connect_pool},
    },
    ports::VersionRepository,
    rules::VersionBumper,
    services::{ComputeNextVersionService, ProjectVersionsService},
};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::load()?;
    init_tracing(&config.log_filter)?;

    match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_pool(
                database_url,
                config.database_pool_size,
                config.database_timeout(),
                config.database_statement_timeout(),
            )?;
            info!(
                pool_size = config.database_pool_size,
                "using PostgreSQL version store"
            );
            let repository = PostgresVersionRepository::new(pool, Arc::new(DefaultClock));
            serve(&config, Arc::new(repository)).await
        }
        None => {
            warn!("no database_url configured; versions are kept in memory");
            serve(&config, Arc::new(InMemoryVersionRepository::new())).await
        }
    }
}

async fn serve<R>(config: &ServerConfig, repository: Arc<R>) -> Result<(), Box<dyn Error>>
where
    R: VersionRepository + 'static,
{
    let calculator = Arc::new(VersionBumper::new());
    let compute = ComputeNextVersionService::new(Arc::clone(&repository), calculator)
        .with_max_attempts(config.max_attempts);
    let listing = ProjectVersionsService::new(repository);

    let (handle, cancellation) = Cancellation::new();
    let state = AppState::from_services(compute, listing).with_cancellation(cancellation);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "openversion listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            handle.cancel();
        })
        .await?;
    info!("openversion stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; shutting down");
    }
    info!("shutdown requested; cancelling in-flight requests");
}
