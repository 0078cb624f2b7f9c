//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`observer`] - Observability port injected into every component
//!
//! The domain layer has no dependency on the HTTP layer. Concrete storage and
//! metrics backends live in `crate::infrastructure`.

pub mod entities;
pub mod observer;
pub mod repositories;
