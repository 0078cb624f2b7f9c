//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Longest URL accepted for shortening, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Request to shorten a single URL.
///
/// Syntax checks happen in the shortening service; the DTO only bounds size.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(custom(function = "validate_url_size"))]
    pub url: String,
}

fn validate_url_size(url: &str) -> Result<(), ValidationError> {
    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::new("length"));
    }

    Ok(())
}

/// Issued short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
}
