//! # Shortlink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the storage trait and the observer port
//! - **Application Layer** ([`application`]) - Shortening and redirect services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage and Prometheus metrics
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Core Guarantees
//!
//! - Codes are random, fixed length and alphanumeric
//! - Code uniqueness is enforced by the database; collisions are retried with a
//!   fresh code a bounded number of times
//! - The URL is stored exactly as submitted and returned byte for byte
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://./urlshortener.db"
//! export BASE_URL="http://localhost:8080"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        RedirectResolver, ResolveError, ShortenError, ShortenService, ShortenSettings,
    };
    pub use crate::domain::entities::{NewUrlMapping, UrlMapping};
    pub use crate::domain::repositories::{StorageError, UrlRepository};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
