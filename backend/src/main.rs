//! TOPSIS service entry point.
//!
//! Loads configuration, installs tracing, wires the adapters, and serves
//! the HTTP router until ctrl-c.

use std::future::Future;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use topsis_service::adapters::email::dispatcher_from_config;
use topsis_service::adapters::http::{app_router, RankingAppState};
use topsis_service::adapters::storage::LocalResultStorage;
use topsis_service::application::SubmitRankingHandler;
use topsis_service::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    init_tracing(&config);

    let dispatcher = dispatcher_from_config(&config.email)?;
    let storage = Arc::new(LocalResultStorage::new(config.storage.output_dir.clone()));
    let handler = Arc::new(SubmitRankingHandler::new(
        dispatcher.clone(),
        storage,
        config.email.subject.clone(),
    ));

    let app = app_router(RankingAppState::new(handler), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        transport = dispatcher.transport(),
        output_dir = %config.storage.output_dir.display(),
        "TOPSIS service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running.
async fn wait_for_signal(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
