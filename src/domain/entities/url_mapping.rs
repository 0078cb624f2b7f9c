//! URL mapping entity: a short code bound to the URL it redirects to.

use chrono::{DateTime, Utc};

/// A persisted mapping between a short code and an original URL.
///
/// Mappings are immutable once stored. `original_url` holds the exact string the
/// caller submitted, without scheme completion or normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub code: String,
    pub original_url: String,
}

impl NewUrlMapping {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}
