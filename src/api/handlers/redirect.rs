//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::with_default_scheme;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `302 Found`. A stored URL without a scheme gets `http://` in
/// the `Location` header only; the stored value is unchanged.
///
/// # Errors
///
/// Returns 404 Not Found for unknown, empty or malformed codes.
/// Returns 500 Internal Server Error on storage failures.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.redirect_resolver.resolve(&code).await?;

    let location = Url::parse(&with_default_scheme(original_url.trim())).map_err(|e| {
        tracing::error!(code = %code, error = %e, "Stored URL is not parseable");
        AppError::internal("Internal server error", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response())
}
