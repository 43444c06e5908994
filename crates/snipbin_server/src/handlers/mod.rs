//! HTTP request handlers.

/// Snippet save/view endpoints.
pub mod snippet;
