//! tagnotes server entry point.
//!
//! Opens the database, applies migrations, and serves the HTML interface.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tagnotes::api;
use tagnotes::app_state::AppState;
use tagnotes::config::AppConfig;
use tagnotes::persistence;
use tagnotes::service::NotebookService;
use tagnotes::session::{MemorySessionStore, sweep_expired};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting tagnotes");

    // Open and migrate the store
    let pool = persistence::connect(
        &config.database_url,
        config.database_max_connections,
        config.database_connect_timeout(),
    )
    .await
    .context("failed to open database")?;
    persistence::migrate(&pool)
        .await
        .context("failed to migrate database")?;

    // Sessions live only as long as this process and expire when idle
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl()));
    tokio::spawn(sweep_expired(
        Arc::clone(&sessions),
        config.session_sweep_interval(),
    ));

    // Build application state
    let app_state = AppState {
        notebook: Arc::new(NotebookService::new(pool)),
        sessions,
        cookie_secure: config.session_cookie_secure,
    };

    let app = api::build_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
