//! Utility functions for code generation, URL validation, and error mapping.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - URL syntax and blocklist checks
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
