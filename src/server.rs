//! HTTP server initialization and runtime setup.
//!
//! Handles store backend selection, migrations, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::CityService;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::CityRepository;
use crate::infrastructure::persistence::{MemoryCityRepository, PgCityRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The store backend (PostgreSQL pool + migrations, or the embedded store)
/// - The city service and shared state
/// - The Axum HTTP server with SIGINT/SIGTERM graceful shutdown
///
/// # Errors
///
/// Returns an error if the store connection, migrations, server bind, or
/// server runtime fail.
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let state = AppState::new(Arc::new(CityService::new(repository)));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the store backend selected by the configuration.
async fn build_repository(config: &Config) -> Result<Arc<dyn CityRepository>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using embedded in-memory store");
            Ok(Arc::new(MemoryCityRepository::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres store backend")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgCityRepository::new(Arc::new(pool))))
        }
    }
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, waiting for in-flight requests");
}
