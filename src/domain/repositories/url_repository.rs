//! Storage contract for URL mappings.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use async_trait::async_trait;

/// Errors surfaced by a [`UrlRepository`].
///
/// `CodeCollision` is kept apart from backend failures so the shortening
/// service can retry with a fresh code instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("short code '{code}' is already taken")]
    CodeCollision { code: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Returns true if the error is a unique-code violation.
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::CodeCollision { .. })
    }
}

/// Durable code → URL store with a uniqueness constraint on `code`.
///
/// Implementations must be safe for concurrent use from independent requests and
/// must make an inserted mapping durable before `insert` returns. The engine's
/// unique index is the only coordination point between racing inserts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CodeCollision`] if the code is already stored.
    /// Returns [`StorageError::Database`] on any other engine failure.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StorageError>;

    /// Looks up a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on engine failures.
    async fn lookup(&self, code: &str) -> Result<Option<UrlMapping>, StorageError>;

    /// Checks that the storage backend answers queries.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Releases the underlying connections. Further calls fail.
    async fn close(&self);
}
