//! Core domain library for snipbin (config, snippet factory, storage).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Snippet storage backed by redb.
pub mod db;
/// Application error types (validation/storage/domain).
pub mod error;
/// Snippet construction and validation.
pub mod factory;
/// Data models for the boundary layer and persistence.
pub mod models;
/// Snippet naming helpers.
pub mod naming;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::{Database, SnippetStore};
pub use error::{AppError, ConfigError, StoreError, StoreErrorKind, ValidationError};
pub use factory::SnippetFactory;
pub use models::snippet::{Mode, Snippet, SnippetFields, SnippetView};
