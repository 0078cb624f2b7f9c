//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// A URL without a scheme is accepted and stored as given.
///
/// # Response
///
/// ```json
/// { "code": "aZ3kQ9", "short_url": "http://localhost:8080/aZ3kQ9" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed bodies and invalid URLs.
/// Returns 500 Internal Server Error if no code could be issued or storage failed.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let shortened = state.shorten_service.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse {
        code: shortened.code,
        short_url: shortened.short_url,
    }))
}
