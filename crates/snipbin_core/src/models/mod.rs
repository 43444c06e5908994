//! Data models shared by the factory, the store and the HTTP boundary.

/// Snippet entity, input fields and client-facing views.
pub mod snippet;

#[cfg(test)]
mod tests;
