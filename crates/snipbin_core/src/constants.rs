//! Shared constants used across snipbin crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 38412;

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default snippet retention in seconds (one day).
pub const DEFAULT_RETENTION_SECS: u64 = 24 * 60 * 60;

/// Default interval between expiry sweeps in seconds.
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;

/// Default maximum request body size accepted by the save endpoint.
pub const DEFAULT_MAX_SNIPPET_SIZE: usize = 10 * 1024 * 1024;

/// Length of a snippet id (hex-encoded 128-bit uuid without separators).
pub const SNIPPET_ID_LEN: usize = 32;

/// Prefix of the name synthesized for snippets submitted without one.
pub const DEFAULT_NAME_PREFIX: &str = "Snippet created at";

/// `strftime` layout used in synthesized snippet names.
pub const DEFAULT_NAME_TIME_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";
