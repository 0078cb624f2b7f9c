//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, observer selection and the Axum
//! server lifecycle including graceful shutdown.

use crate::config::Config;
use crate::domain::observer::Observer;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::metrics::{NoopObserver, PrometheusObserver};
use crate::infrastructure::persistence::{self, SqliteUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often Prometheus histogram buffers are drained.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Schema migrations
/// - Prometheus observer (or NoopObserver when disabled)
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains in-flight
/// requests and closes the pool.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(&config).await?;
    tracing::info!("Connected to database");

    persistence::migrate(&pool).await?;
    tracing::info!("Migrations applied");

    let observer: Arc<dyn Observer> = if config.metrics_enabled {
        let prometheus =
            Arc::new(PrometheusObserver::new().context("Failed to build metrics recorder")?);
        spawn_metrics_upkeep(prometheus.clone());
        tracing::info!("Metrics enabled (Prometheus)");
        prometheus
    } else {
        tracing::info!("Metrics disabled (NoopObserver)");
        Arc::new(NoopObserver::new())
    };

    let repository = Arc::new(SqliteUrlRepository::new(Arc::new(pool), observer.clone()));

    let state = AppState::new(
        repository.clone(),
        observer,
        config.url_validator(),
        config.shorten_settings(),
    );

    let app = app_router(state, &config.web_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutting down, closing database pool");
    repository.close().await;
    tracing::info!("Server stopped gracefully");

    Ok(())
}

fn spawn_metrics_upkeep(observer: Arc<PrometheusObserver>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            observer.run_upkeep();
        }
    });
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
