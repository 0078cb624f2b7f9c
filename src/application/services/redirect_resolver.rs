//! Short code resolution for redirects.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::observer::Observer;
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::utils::code_generator::is_well_formed_code;

/// Errors returned by [`RedirectResolver::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Unknown code. Empty and malformed codes end up here as well.
    #[error("Short link not found")]
    NotFound,

    #[error(transparent)]
    Storage(StorageError),
}

/// Resolves short codes to the URLs they were issued for.
pub struct RedirectResolver<R: UrlRepository> {
    repository: Arc<R>,
    observer: Arc<dyn Observer>,
}

impl<R: UrlRepository> RedirectResolver<R> {
    /// Creates a new resolver.
    pub fn new(repository: Arc<R>, observer: Arc<dyn Observer>) -> Self {
        Self {
            repository,
            observer,
        }
    }

    /// Returns the original URL stored for `code`, byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] for unknown codes, and for empty or
    /// malformed codes without querying storage.
    /// Returns [`ResolveError::Storage`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        if !is_well_formed_code(code) {
            self.observer.url_not_found();
            debug!(code = %code, "Rejected malformed short code");
            return Err(ResolveError::NotFound);
        }

        match self.repository.lookup(code).await {
            Ok(Some(mapping)) => {
                self.observer.url_redirected();
                debug!(code = %code, original_url = %mapping.original_url, "Short code resolved");
                Ok(mapping.original_url)
            }
            Ok(None) => {
                self.observer.url_not_found();
                warn!(code = %code, "URL not found for short code");
                Err(ResolveError::NotFound)
            }
            Err(e) => {
                self.observer.internal_error();
                error!(code = %code, error = %e, "Failed to resolve short code");
                Err(ResolveError::Storage(e))
            }
        }
    }
}
