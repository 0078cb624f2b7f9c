//! Handler for the Prometheus scrape endpoint.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Renders collected metrics in Prometheus text format.
///
/// # Endpoint
///
/// `GET /metrics`
///
/// Returns 404 when the configured observer does not expose metrics.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.observer.render() {
        Some(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
