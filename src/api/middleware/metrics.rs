//! HTTP request metrics middleware.

use axum::{
    body::HttpBody,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::state::AppState;

/// Reports method, route, status, body size and latency of every request to the
/// observer.
///
/// The endpoint label is the matched route template (`/{code}`, not the
/// concrete code) to keep label cardinality bounded.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), metrics::layer));
/// ```
pub async fn layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    // Streamed bodies without an exact size report their lower bound.
    let size_hint = response.body().size_hint();
    let response_bytes = size_hint.exact().unwrap_or(size_hint.lower());

    state.observer.http_request(
        &method,
        &endpoint,
        response.status().as_u16(),
        response_bytes,
        started.elapsed(),
    );

    response
}
