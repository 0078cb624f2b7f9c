//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the observer port and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Validated, collision-safe code issuance
//! - [`services::redirect_resolver::RedirectResolver`] - Short code lookup for redirects

pub mod services;
