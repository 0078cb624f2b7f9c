//! Observability port.
//!
//! Components receive an `Arc<dyn Observer>` at construction time and report
//! named events through it. The transport (Prometheus, nothing at all) is chosen
//! once at startup; see [`crate::infrastructure::metrics`].

use std::time::Duration;

/// Storage operation reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Insert,
    Lookup,
    Ping,
}

impl StorageOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "store_url",
            Self::Lookup => "get_url",
            Self::Ping => "ping",
        }
    }
}

/// Outcome of a storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOutcome {
    Success,
    NotFound,
    Collision,
    Error,
}

impl StorageOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Collision => "collision",
            Self::Error => "error",
        }
    }
}

/// Sink for service-level events.
#[cfg_attr(test, mockall::automock)]
pub trait Observer: Send + Sync {
    /// A mapping was created.
    fn url_shortened(&self);

    /// A code resolved and the client was redirected.
    fn url_redirected(&self);

    /// A redirect was requested for an unknown or malformed code.
    fn url_not_found(&self);

    /// A request failed with a server-side error.
    fn internal_error(&self);

    fn storage_operation(
        &self,
        operation: StorageOperation,
        outcome: StorageOutcome,
        elapsed: Duration,
    );

    /// A request finished. `response_bytes` is the body size as far as it is known.
    fn http_request(
        &self,
        method: &str,
        endpoint: &str,
        status: u16,
        response_bytes: u64,
        elapsed: Duration,
    );

    /// Renders collected metrics in a scrapeable text format, if supported.
    fn render(&self) -> Option<String> {
        None
    }
}
