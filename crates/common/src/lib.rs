//! Shared utilities, configuration, and error handling for the job board
//!
//! This crate provides common functionality used across the job board API:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors for validated JSON bodies and pagination

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, StoreProvider};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Page, PageRequest, Path, Query, ValidatedJson};
