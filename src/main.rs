//! Riftboard API server.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riftboard::{create_router, spawn_cleanup_task, AppState, Config};

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from the environment (and `.env`)
/// 3. Build vendor clients and the server caches
/// 4. Start the background cache cleanup task
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riftboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Riftboard API server");

    let config = Config::from_env();
    info!(
        port = config.server_port,
        platform = %config.riot_platform,
        region = %config.riot_region,
        cache_max_entries = config.cache_max_entries,
        cache_ttl_secs = config.cache_ttl_secs,
        "Configuration loaded"
    );
    if config.riot_api_key.is_empty() {
        warn!("RIOT_API_KEY is not set; match and player endpoints will fail");
    }
    if config.internal_secret.is_empty() {
        warn!("INTERNAL_REVALIDATE_SECRET is not set; revalidation is disabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let cleanup_interval = config.cleanup_interval;

    let state = AppState::from_config(config).context("failed to build HTTP clients")?;
    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), cleanup_interval);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
