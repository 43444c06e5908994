//! Application error types for snippet validation, storage and startup.
use thiserror::Error;

/// Top-level application error type.
///
/// Validation and not-found errors are client-class; generation and store
/// errors are service-class and must not leak their detail to clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to generate snippet id: {0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Snippet {0} not found")]
    NotFound(String),
}

/// Rejected snippet input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    #[error("Snippet body is empty")]
    EmptyBody,

    #[error("Unsupported mode '{0}'")]
    UnsupportedMode(String),
}

/// Coarse classification of [`StoreError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Backend communication, transaction or commit failure.
    Backend,
    /// The record was written but its time-to-live could not be set.
    Expiry,
    /// A stored record could not be decoded.
    MalformedData,
}

/// Failure inside the snippet store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Backend(#[from] redb::Error),

    #[error("Failed to set expiration on snippet {id}: {source}")]
    Expiry {
        id: String,
        #[source]
        source: redb::Error,
    },

    #[error("Malformed {field} '{value}' stored for snippet {id}")]
    Malformed {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Backend(_) => StoreErrorKind::Backend,
            Self::Expiry { .. } => StoreErrorKind::Expiry,
            Self::Malformed { .. } | Self::Serialization(_) => StoreErrorKind::MalformedData,
        }
    }
}

impl From<redb::DatabaseError> for StoreError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(value: redb::TableError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(value: redb::StorageError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(value: redb::CommitError) -> Self {
        Self::Backend(value.into())
    }
}

/// Invalid or missing startup configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
