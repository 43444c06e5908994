//! Shared test-only helpers for snipbin_core.

use crate::db::{Database, RedbSnippetStore};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use tempfile::TempDir;

/// Creates an isolated temporary database and a store over it.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
pub(crate) fn setup_temp_store(retention: Duration) -> (RedbSnippetStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::open(db_path.to_str().expect("db path")).expect("db");
    (RedbSnippetStore::new(db, retention), temp_dir)
}

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_env(key: &str, value: Option<&str>) {
    // SAFETY: every mutation happens while `env_lock` is held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Serializes environment mutation across tests and restores every touched
/// variable when dropped.
pub(crate) struct EnvScope {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub(crate) fn new() -> Self {
        let lock = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    fn remember(&mut self, key: &str) {
        if self.saved.iter().all(|(saved, _)| saved != key) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.remember(key);
        write_env(key, Some(value));
        self
    }

    pub(crate) fn unset(&mut self, key: &str) -> &mut Self {
        self.remember(key);
        write_env(key, None);
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            write_env(&key, previous.as_deref());
        }
    }
}
