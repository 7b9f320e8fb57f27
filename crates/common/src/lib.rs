//! Shared utilities, configuration, and error handling for VenturesRoom
//!
//! This crate provides common functionality used across the application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - SQLite pool construction and migrations
//! - Request extractors (validated JSON, pagination)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, Environment};
pub use db::RepositoryError;
pub use error::{Error, FieldError, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use state::StateError;
