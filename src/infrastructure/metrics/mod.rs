//! Observer implementations.
//!
//! - [`PrometheusObserver`] - Prometheus text exposition, served on `/metrics`
//! - [`NoopObserver`] - Discards events when metrics are disabled

mod noop_observer;
mod prometheus_observer;

pub use noop_observer::NoopObserver;
pub use prometheus_observer::PrometheusObserver;
