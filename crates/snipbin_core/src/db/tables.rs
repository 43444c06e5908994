//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Snippet records keyed by id (bincode-encoded field map).
pub const SNIPPETS: TableDefinition<&str, &[u8]> = TableDefinition::new("snippets");
/// Expiry deadline (unix millis) per snippet id.
pub const SNIPPET_EXPIRY: TableDefinition<&str, u64> = TableDefinition::new("snippet_expiry");
/// Deadline-ordered index used by the reaper.
pub const SNIPPET_EXPIRY_INDEX: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("snippet_expiry_index");
