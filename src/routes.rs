//! Top-level router combining service routes and the static frontend.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Create a short link
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Health check
//! - `GET  /metrics`     - Prometheus metrics
//! - `GET  /`            - Frontend page
//! - `/static/*`         - Frontend assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Metrics** - Per-route request counters and latency histograms
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{metrics, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `web_dir` - directory holding `index.html` and the frontend assets
pub fn app_router(state: AppState, web_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    let web_dir = web_dir.as_ref();

    let router = api::routes::service_routes()
        .route_service("/", ServeFile::new(web_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(web_dir))
        .layer(middleware::from_fn_with_state(state.clone(), metrics::layer))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
