//! Motor Insurance API Server Binary
//!
//! Starts the HTTP API together with the expired-policy sweep worker.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL with default configuration
//! cargo run --bin car-insurance-api
//!
//! # Run without a database
//! API_STORE_BACKEND=memory API_PORT=9000 cargo run --bin car-insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORE_BACKEND` - `postgres` or `memory` (default: postgres)
//! * `API_SEED_DEMO_DATA` - Seed demo records into an empty store (default: true)
//! * `API_EXPIRY_SWEEP_INTERVAL_SECS` - Sweep period (default: 600)
//! * `API_EXPIRY_LOOKBACK_SECS` - Sweep lookback (default: 3600)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_motor::seed::ensure_seeded;
use domain_motor::{ExpiryWorker, InMemoryMotorStore, MotorStorePort};
use infra_db::{create_pool, run_migrations, PostgresMotorAdapter};
use interface_api::config::{ApiConfig, StoreBackend};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, prepares the store, spawns the
/// expiry worker and serves HTTP until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store_backend,
        "Starting Motor Insurance API Server"
    );

    let store = build_store(&config).await?;

    if config.seed_demo_data && ensure_seeded(store.as_ref()).await.context("Failed to seed demo data")? {
        tracing::info!("Demo data loaded");
    }

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let worker = ExpiryWorker::new(config.expiry_config());
    let worker_handle = tokio::spawn(worker.run(store.clone(), async move {
        let _ = shutdown_rx.changed().await;
    }));

    let app = create_router(AppState::new(store, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = worker_handle.await {
        tracing::error!(error = %e, "Expiry worker terminated abnormally");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Creates the configured store, migrating the database when PostgreSQL is used
async fn build_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn MotorStorePort>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data will not survive a restart");
            Ok(Arc::new(InMemoryMotorStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = create_pool(config.database_config())
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to apply migrations")?;
            Ok(Arc::new(PostgresMotorAdapter::new(pool)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
