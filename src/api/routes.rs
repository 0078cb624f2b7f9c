//! API route configuration.

use crate::api::handlers::{
    health_handler, metrics_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Core service routes.
///
/// # Endpoints
///
/// - `POST /shorten`  - Create a short link
/// - `GET  /health`   - Health check
/// - `GET  /metrics`  - Prometheus metrics
/// - `GET  /{code}`   - Redirect to the original URL
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{code}", get(redirect_handler))
}
