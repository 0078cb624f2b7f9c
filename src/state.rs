//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{RedirectResolver, ShortenService, ShortenSettings};
use crate::domain::observer::Observer;
use crate::infrastructure::persistence::SqliteUrlRepository;
use crate::utils::url_validator::UrlValidator;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<SqliteUrlRepository>>,
    pub redirect_resolver: Arc<RedirectResolver<SqliteUrlRepository>>,
    pub repository: Arc<SqliteUrlRepository>,
    pub observer: Arc<dyn Observer>,
}

impl AppState {
    /// Wires services around a single repository and observer.
    pub fn new(
        repository: Arc<SqliteUrlRepository>,
        observer: Arc<dyn Observer>,
        validator: UrlValidator,
        settings: ShortenSettings,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(
            repository.clone(),
            validator,
            observer.clone(),
            settings,
        ));
        let redirect_resolver = Arc::new(RedirectResolver::new(
            repository.clone(),
            observer.clone(),
        ));

        Self {
            shorten_service,
            redirect_resolver,
            repository,
            observer,
        }
    }
}
