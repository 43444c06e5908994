//! Default display names for snippets submitted without one.

use crate::constants::{DEFAULT_NAME_PREFIX, DEFAULT_NAME_TIME_FORMAT};
use chrono::{DateTime, Utc};

/// Synthesize a name from the snippet's creation time.
///
/// Produces e.g. `Snippet created at Tue Nov  7 09:03:05 UTC 2023`.
pub fn default_name(created_at: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        DEFAULT_NAME_PREFIX,
        created_at.format(DEFAULT_NAME_TIME_FORMAT)
    )
}

/// Resolve the display name, falling back to [`default_name`] when the
/// supplied one is absent or holds no characters.
pub fn resolve_name(supplied: Option<String>, created_at: DateTime<Utc>) -> String {
    match supplied {
        Some(name) if !name.is_empty() => name,
        _ => default_name(created_at),
    }
}
