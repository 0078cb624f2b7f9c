//! HTTP middleware for request observability.

pub mod metrics;
pub mod tracing;
