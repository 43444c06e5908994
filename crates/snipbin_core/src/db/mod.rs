//! Storage layer: the snippet store contract and its redb implementation.

mod record;
/// Redb-backed snippet store with lazy and background expiry.
pub mod snippet;
/// Table definitions.
pub mod tables;

use crate::error::{AppError, StoreError};
use crate::models::snippet::Snippet;
use redb::ReadableDatabase;
use std::path::Path;
use std::sync::Arc;

pub use self::snippet::RedbSnippetStore;
use self::tables::{SNIPPETS, SNIPPET_EXPIRY, SNIPPET_EXPIRY_INDEX};


/// Persistence contract for snippets keyed by id.
///
/// Implementations must be safe to call concurrently and must report an
/// expired or never-saved id as [`AppError::NotFound`].
pub trait SnippetStore: Send + Sync {
    /// Persist `snippet` under its id and (re)start its time-to-live.
    ///
    /// # Errors
    /// Returns [`AppError::Store`] when the write or the expiry update fails.
    fn save(&self, snippet: &Snippet) -> Result<(), AppError>;

    /// Fetch a live snippet by id.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] for absent or expired ids and
    /// [`AppError::Store`] for backend or decoding failures.
    fn get(&self, id: &str) -> Result<Snippet, AppError>;

    /// Remove records whose time-to-live has elapsed.
    ///
    /// Backends with native key expiry have nothing to do.
    ///
    /// # Returns
    /// Number of records removed.
    fn purge_expired(&self) -> Result<usize, AppError> {
        Ok(0)
    }
}

/// Handle to the redb database file.
#[derive(Clone)]
pub struct Database {
    pub db: Arc<redb::Database>,
}

impl Database {
    /// Open (or create) the database under `path` and initialize tables.
    ///
    /// `path` is a directory; the redb file lives inside it.
    ///
    /// # Errors
    /// Returns an error if the directory or database cannot be created.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::Store(StoreError::Backend(redb::StorageError::Io(err).into()))
        })?;
        let file = dir.join(tables::REDB_FILE_NAME);
        let db = redb::Database::create(&file).map_err(StoreError::from)?;
        let database = Self { db: Arc::new(db) };
        database.init_tables()?;
        tracing::debug!("Opened snippet database at {}", file.display());
        Ok(database)
    }

    fn init_tables(&self) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        write_txn.open_table(SNIPPETS)?;
        write_txn.open_table(SNIPPET_EXPIRY)?;
        write_txn.open_table(SNIPPET_EXPIRY_INDEX)?;
        write_txn.commit()?;
        Ok(())
    }

    /// Number of stored snippet records, live or not yet reaped.
    ///
    /// # Errors
    /// Returns an error when the read transaction fails.
    pub fn record_count(&self) -> Result<u64, AppError> {
        let count = || -> Result<u64, StoreError> {
            let read_txn = self.db.begin_read()?;
            let snippets = read_txn.open_table(SNIPPETS)?;
            Ok(redb::ReadableTableMetadata::len(&snippets)?)
        };
        Ok(count()?)
    }

    /// Flush pending writes before shutdown.
    ///
    /// redb makes every commit durable, so there is nothing left to write.
    ///
    /// # Errors
    /// Currently infallible.
    pub fn flush(&self) -> Result<(), AppError> {
        Ok(())
    }
}
