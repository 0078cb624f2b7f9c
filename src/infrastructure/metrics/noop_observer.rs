//! Observer that discards every event.

use std::time::Duration;
use tracing::debug;

use crate::domain::observer::{Observer, StorageOperation, StorageOutcome};

/// An observer implementation that does nothing.
///
/// Used when metrics are disabled, by the admin CLI, and in tests.
pub struct NoopObserver;

impl NoopObserver {
    /// Creates a new NoopObserver instance.
    pub fn new() -> Self {
        debug!("Using NoopObserver (metrics disabled)");
        Self
    }
}

impl Default for NoopObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for NoopObserver {
    fn url_shortened(&self) {}

    fn url_redirected(&self) {}

    fn url_not_found(&self) {}

    fn internal_error(&self) {}

    fn storage_operation(
        &self,
        _operation: StorageOperation,
        _outcome: StorageOutcome,
        _elapsed: Duration,
    ) {
    }

    fn http_request(
        &self,
        _method: &str,
        _endpoint: &str,
        _status: u16,
        _response_bytes: u64,
        _elapsed: Duration,
    ) {
    }
}
