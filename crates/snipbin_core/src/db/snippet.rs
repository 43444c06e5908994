//! Snippet storage operations backed by redb.
//!
//! redb has no per-key TTL, so every save also records a deadline in
//! [`SNIPPET_EXPIRY`] plus a deadline-ordered index. Reads treat a passed
//! deadline as a miss; [`RedbSnippetStore::purge_expired_at`] deletes the
//! dead rows.

use super::record;
use super::tables::{SNIPPETS, SNIPPET_EXPIRY, SNIPPET_EXPIRY_INDEX};
use super::{Database, SnippetStore};
use crate::error::{AppError, StoreError};
use crate::models::snippet::Snippet;
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn unix_millis(now: SystemTime) -> u64 {
    now.duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn set_expiry(txn: &WriteTransaction, id: &str, deadline: u64) -> Result<(), redb::Error> {
    let mut expiry = txn.open_table(SNIPPET_EXPIRY)?;
    let mut index = txn.open_table(SNIPPET_EXPIRY_INDEX)?;
    let previous = expiry.insert(id, deadline)?.map(|guard| guard.value());
    if let Some(previous) = previous {
        index.remove((previous, id))?;
    }
    index.insert((deadline, id), ())?;
    Ok(())
}

/// Snippet store over a redb [`Database`].
#[derive(Clone)]
pub struct RedbSnippetStore {
    db: Arc<redb::Database>,
    retention: Duration,
}

impl RedbSnippetStore {
    /// Create a store whose records expire `retention` after each save.
    pub fn new(database: Database, retention: Duration) -> Self {
        Self {
            db: database.db,
            retention,
        }
    }

    /// Persist `snippet` with a deadline of `now + retention`.
    ///
    /// The record and its deadline commit in one write transaction; if the
    /// deadline cannot be written the record is discarded with it.
    ///
    /// # Errors
    /// [`StoreError::Expiry`] when the deadline cannot be set, otherwise
    /// [`StoreError::Backend`]/[`StoreError::Serialization`].
    pub fn save_at(&self, snippet: &Snippet, now: SystemTime) -> Result<(), AppError> {
        self.write_with_expiry(snippet, now).map_err(|err| {
            tracing::error!("Failed to save snippet {}: {}", snippet.id, err);
            AppError::Store(err)
        })
    }

    fn write_with_expiry(&self, snippet: &Snippet, now: SystemTime) -> Result<(), StoreError> {
        let encoded = record::encode(snippet)?;
        let retention_millis = u64::try_from(self.retention.as_millis()).unwrap_or(u64::MAX);
        let deadline = unix_millis(now).saturating_add(retention_millis);

        let write_txn = self.db.begin_write()?;
        {
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            snippets.insert(snippet.id.as_str(), encoded.as_slice())?;
        }
        tracing::debug!("Snippet {} written", snippet.id);

        set_expiry(&write_txn, &snippet.id, deadline).map_err(|source| StoreError::Expiry {
            id: snippet.id.clone(),
            source,
        })?;
        write_txn.commit()?;
        tracing::debug!(
            "Set expiration of snippet {} to {} seconds",
            snippet.id,
            self.retention.as_secs()
        );
        Ok(())
    }

    /// Fetch a snippet, treating deadlines at or before `now` as expired.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when absent or expired; [`AppError::Store`] on
    /// backend or decoding failures.
    pub fn get_at(&self, id: &str, now: SystemTime) -> Result<Snippet, AppError> {
        match self.lookup(id, unix_millis(now)) {
            Ok(Some(snippet)) => Ok(snippet),
            Ok(None) => Err(AppError::NotFound(id.to_string())),
            Err(err) => {
                tracing::error!("Failed to retrieve snippet {}: {}", id, err);
                Err(AppError::Store(err))
            }
        }
    }

    fn lookup(&self, id: &str, now_millis: u64) -> Result<Option<Snippet>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let snippets = read_txn.open_table(SNIPPETS)?;
        let expiry = read_txn.open_table(SNIPPET_EXPIRY)?;

        let Some(raw) = snippets.get(id)? else {
            tracing::debug!("Snippet {} not in storage", id);
            return Ok(None);
        };
        match expiry.get(id)?.map(|guard| guard.value()) {
            Some(deadline) if deadline <= now_millis => {
                tracing::debug!("Snippet {} expired, awaiting purge", id);
                return Ok(None);
            }
            Some(_) => {}
            None => tracing::warn!("Snippet {} has no expiration set", id),
        }
        record::decode(id, raw.value()).map(Some)
    }

    /// Remaining time-to-live of `id` at `now`.
    ///
    /// # Returns
    /// `None` when the record is absent, expired, or carries no deadline.
    ///
    /// # Errors
    /// Returns an error when the read transaction fails.
    pub fn ttl_at(&self, id: &str, now: SystemTime) -> Result<Option<Duration>, AppError> {
        let read = || -> Result<Option<u64>, StoreError> {
            let read_txn = self.db.begin_read()?;
            let expiry = read_txn.open_table(SNIPPET_EXPIRY)?;
            let deadline = expiry.get(id)?.map(|guard| guard.value());
            Ok(deadline)
        };
        let now_millis = unix_millis(now);
        Ok(read()?
            .filter(|deadline| *deadline > now_millis)
            .map(|deadline| Duration::from_millis(deadline - now_millis)))
    }

    /// Delete every record whose deadline is at or before `now`.
    ///
    /// # Returns
    /// Number of records removed.
    ///
    /// # Errors
    /// Returns an error when the write transaction fails; nothing is removed
    /// in that case.
    pub fn purge_expired_at(&self, now: SystemTime) -> Result<usize, AppError> {
        self.purge_until(unix_millis(now)).map_err(|err| {
            tracing::error!("Failed to purge expired snippets: {}", err);
            AppError::Store(err)
        })
    }

    fn purge_until(&self, now_millis: u64) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            let mut expiry = write_txn.open_table(SNIPPET_EXPIRY)?;
            let mut index = write_txn.open_table(SNIPPET_EXPIRY_INDEX)?;

            let mut due = Vec::new();
            for entry in index.iter()? {
                let (key, _) = entry?;
                let (deadline, id) = key.value();
                if deadline > now_millis {
                    break;
                }
                due.push((deadline, id.to_string()));
            }

            for (deadline, id) in &due {
                index.remove((*deadline, id.as_str()))?;
                expiry.remove(id.as_str())?;
                snippets.remove(id.as_str())?;
            }
            due.len()
        };
        write_txn.commit()?;
        if removed > 0 {
            tracing::debug!("Purged {} expired snippet(s)", removed);
        }
        Ok(removed)
    }
}

impl SnippetStore for RedbSnippetStore {
    fn save(&self, snippet: &Snippet) -> Result<(), AppError> {
        self.save_at(snippet, SystemTime::now())
    }

    fn get(&self, id: &str) -> Result<Snippet, AppError> {
        self.get_at(id, SystemTime::now())
    }

    fn purge_expired(&self) -> Result<usize, AppError> {
        self.purge_expired_at(SystemTime::now())
    }
}
