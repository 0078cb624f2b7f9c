//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short code to URL mapping
//! - [`NewUrlMapping`] - Input for inserting a mapping

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
