//! Cached File Server - A static image server with pluggable in-memory caches
//!
//! Serves `.gif` and `.png` files from a root directory, memoizing file
//! contents in one of three thread-safe cache variants.

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cached_file_server::api::create_router;
use cached_file_server::{spawn_stats_reporter, AppState, Config};

/// Main entry point for the file server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Build the Tokio runtime with the configured worker count
/// 4. Create the cache for the configured strategy
/// 5. Start the background stats reporter
/// 6. Start HTTP server on configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cached_file_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cached File Server");

    // Load configuration from environment variables
    let config = Config::from_env().context("invalid configuration")?;
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: strategy={}, capacity={}, root_dir={}, address={}, stats_interval={}s",
        config.cache_strategy,
        config.cache_capacity,
        config.root_dir.display(),
        config.bind_address(),
        config.stats_interval
    );

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = config.worker_threads {
        builder.worker_threads(workers);
        info!("Using {} worker threads", workers);
    }
    let runtime = builder.build().context("failed to build Tokio runtime")?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if !config.root_dir.is_dir() {
        warn!(
            "Root directory {} does not exist; every file request will fail",
            config.root_dir.display()
        );
    }

    // Create application state with the configured cache
    let state = AppState::from_config(&config).context("failed to create cache")?;
    info!("Cache initialized ({})", config.cache_strategy);

    // Start background stats reporter
    let reporter = (config.stats_interval > 0)
        .then(|| spawn_stats_reporter(state.clone(), config.stats_interval));

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reporter))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the stats reporter and allows graceful shutdown.
async fn shutdown_signal(reporter: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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

    if let Some(reporter) = reporter {
        reporter.abort();
        warn!("Stats reporter aborted");
    }
}
