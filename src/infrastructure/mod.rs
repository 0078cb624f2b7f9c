//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`metrics`] - Observer implementations (Prometheus and no-op)
//! - [`persistence`] - SQLite repository implementation and pool setup

pub mod metrics;
pub mod persistence;
