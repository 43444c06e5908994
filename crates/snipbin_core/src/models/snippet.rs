//! Snippet data models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form field carrying the snippet name.
pub const NAME_FIELD: &str = "snippetName";
/// Form field carrying the snippet body.
pub const BODY_FIELD: &str = "snippetText";
/// Form field carrying the highlighting mode.
pub const MODE_FIELD: &str = "mode";

/// Syntax-highlighting mode attached to a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Python,
    Golang,
    Rust,
    Javascript,
    Text,
}

impl Mode {
    /// Every supported mode.
    pub const ALL: [Mode; 5] = [
        Mode::Python,
        Mode::Golang,
        Mode::Rust,
        Mode::Javascript,
        Mode::Text,
    ];

    /// Wire/storage name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Python => "python",
            Mode::Golang => "golang",
            Mode::Rust => "rust",
            Mode::Javascript => "javascript",
            Mode::Text => "text",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no supported mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    // Exact, case-sensitive match against the allow-list.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| UnknownMode(value.to_string()))
    }
}

/// A saved, immutable unit of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// 32 lowercase hex characters; also the storage key.
    pub id: String,
    pub name: String,
    pub body: String,
    pub mode: Mode,
    /// Unix seconds, UTC.
    pub time_created: i64,
    /// Advisory only; the store enforces the real expiry.
    pub time_expired: i64,
    /// Reserved, always empty.
    pub user_id: String,
}

/// Raw input fields extracted by the boundary layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFields {
    pub name: Option<String>,
    pub body: Option<String>,
    pub mode: Option<String>,
}

/// Client-facing representation of a snippet.
///
/// The id and user id are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetView {
    pub snippet_name: String,
    pub snippet_text: String,
    pub mode: Mode,
    pub time_expired: i64,
    pub time_created: i64,
}

impl From<&Snippet> for SnippetView {
    fn from(value: &Snippet) -> Self {
        Self {
            snippet_name: value.name.clone(),
            snippet_text: value.body.clone(),
            mode: value.mode,
            time_expired: value.time_expired,
            time_created: value.time_created,
        }
    }
}

/// Response payload for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnippetResponse {
    #[serde(rename = "snippetId")]
    pub snippet_id: String,
}

/// Whether `id` has the shape of a snippet id (`^[0-9a-f]{32}$`).
pub fn is_valid_snippet_id(id: &str) -> bool {
    id.len() == crate::constants::SNIPPET_ID_LEN
        && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
