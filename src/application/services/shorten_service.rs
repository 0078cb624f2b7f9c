//! Short link issuance: validate, generate, store with retry.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::observer::Observer;
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved_code};
use crate::utils::url_validator::{UrlValidationError, UrlValidator};

/// Default bound on insert attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Failure to obtain a free short code.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No free short code after {attempts} attempts")]
    CollisionsExhausted { attempts: usize },

    #[error("Entropy source failure: {0}")]
    Entropy(getrandom::Error),
}

/// Errors returned by [`ShortenService::shorten`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Storage(StorageError),
}

/// Tunables for code issuance.
#[derive(Debug, Clone)]
pub struct ShortenSettings {
    /// Public prefix of every short URL, e.g. `https://sho.rt`.
    pub base_url: String,
    pub code_length: usize,
    pub max_attempts: usize,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A freshly issued short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub code: String,
    pub short_url: String,
}

/// Service that issues short codes for URLs.
///
/// Each call validates the input, draws a random code and inserts it. When the
/// storage reports a code collision, or the code equals a fixed route segment,
/// a new code is drawn, up to `max_attempts` draws in total. Exactly one row is written on success and
/// none on any failure path.
pub struct ShortenService<R: UrlRepository> {
    repository: Arc<R>,
    validator: UrlValidator,
    observer: Arc<dyn Observer>,
    settings: ShortenSettings,
    code_source: fn(usize) -> Result<String, getrandom::Error>,
}

impl<R: UrlRepository> ShortenService<R> {
    /// Creates a new shortening service.
    pub fn new(
        repository: Arc<R>,
        validator: UrlValidator,
        observer: Arc<dyn Observer>,
        settings: ShortenSettings,
    ) -> Self {
        Self {
            repository,
            validator,
            observer,
            settings,
            code_source: generate_code,
        }
    }

    #[cfg(test)]
    fn with_code_source(
        mut self,
        code_source: fn(usize) -> Result<String, getrandom::Error>,
    ) -> Self {
        self.code_source = code_source;
        self
    }

    /// Shortens `raw_url`, storing it exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::InvalidUrl`] without touching storage if the URL
    /// fails validation.
    ///
    /// Returns [`ShortenError::Generation`] if every attempt collided or the
    /// entropy source failed.
    ///
    /// Returns [`ShortenError::Storage`] on database errors. These are not retried.
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortenedUrl, ShortenError> {
        if let Err(e) = self.validator.validate(raw_url) {
            warn!(url = %raw_url, error = %e, "Rejected URL for shortening");
            return Err(e.into());
        }

        let mapping = self.insert_with_retry(raw_url).await.inspect_err(|e| {
            self.observer.internal_error();
            error!(url = %raw_url, error = %e, "Failed to shorten URL");
        })?;

        let short_url = self.short_url(&mapping.code);
        self.observer.url_shortened();
        info!(
            original_url = %mapping.original_url,
            code = %mapping.code,
            short_url = %short_url,
            "URL shortened"
        );

        Ok(ShortenedUrl {
            code: mapping.code,
            short_url,
        })
    }

    /// Builds the public short URL for `code`.
    ///
    /// One trailing slash is stripped from the base URL.
    pub fn short_url(&self, code: &str) -> String {
        let base = self
            .settings
            .base_url
            .strip_suffix('/')
            .unwrap_or(&self.settings.base_url);

        format!("{base}/{code}")
    }

    async fn insert_with_retry(&self, raw_url: &str) -> Result<UrlMapping, ShortenError> {
        for attempt in 1..=self.settings.max_attempts {
            let code =
                (self.code_source)(self.settings.code_length).map_err(GenerationError::Entropy)?;

            if is_reserved_code(&code) {
                warn!(code = %code, attempt, "Generated code shadows a route, retrying");
                continue;
            }

            match self
                .repository
                .insert(NewUrlMapping::new(code, raw_url))
                .await
            {
                Ok(mapping) => return Ok(mapping),
                Err(StorageError::CodeCollision { code }) => {
                    warn!(code = %code, attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(ShortenError::Storage(e)),
            }
        }

        Err(GenerationError::CollisionsExhausted {
            attempts: self.settings.max_attempts,
        }
        .into())
    }
}
