//! Key/value storage tiers backing the session store.
//!
//! Storage follows browser-storage semantics: reads and writes never fail
//! from the caller's point of view. A durable tier that cannot be read
//! degrades to empty, and write failures are logged and swallowed.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// File name of the durable session store inside the state directory.
const SESSION_FILE: &str = "session.json";

/// A best-effort string key/value store.
pub trait StorageTier: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value. Failures are logged, never raised.
    fn set(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// Durable tier persisted as a JSON file, write-through on every change.
pub struct DurableStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl DurableStore {
    /// Open the store under `dir`, loading any existing session file.
    ///
    /// A missing file starts empty; an unreadable or malformed file degrades
    /// to empty with a warning.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SESSION_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "session file is malformed; starting with empty state"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "could not read session file; starting with empty state"
                );
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            warn!(
                path = %parent.display(),
                error = %err,
                "could not create state directory; session state will not persist"
            );
            return;
        }

        match serde_json::to_string_pretty(entries) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "could not write session file; session state will not persist"
                    );
                }
            }
            Err(err) => {
                warn!(error = %err, "could not serialize session state");
            }
        }
    }
}

impl StorageTier for DurableStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

/// Ephemeral tier held in memory, lost when the process exits.
#[derive(Default)]
pub struct EphemeralStore {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageTier for EphemeralStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_durable_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::open(dir.path());
        store.set("token", "abc123");
        assert_eq!(store.get("token"), Some("abc123".to_string()));

        // A fresh open reads back what was flushed to disk
        let reopened = DurableStore::open(dir.path());
        assert_eq!(reopened.get("token"), Some("abc123".to_string()));
    }

    #[test]
    fn test_durable_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::open(dir.path());
        store.set("token", "abc123");
        store.remove("token");

        let reopened = DurableStore::open(dir.path());
        assert_eq!(reopened.get("token"), None);
    }

    #[test]
    fn test_durable_store_degrades_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "not json{{").unwrap();

        let store = DurableStore::open(dir.path());
        assert_eq!(store.get("token"), None);

        // The store stays usable and overwrites the bad file
        store.set("token", "fresh");
        let reopened = DurableStore::open(dir.path());
        assert_eq!(reopened.get("token"), Some("fresh".to_string()));
    }

    #[test]
    fn test_durable_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("deep");
        let store = DurableStore::open(&nested);
        store.set("key", "value");
        assert!(nested.join(SESSION_FILE).exists());
    }

    #[test]
    fn test_ephemeral_store_is_not_persisted() {
        let store = EphemeralStore::default();
        store.set("token", "abc123");
        assert_eq!(store.get("token"), Some("abc123".to_string()));

        let fresh = EphemeralStore::default();
        assert_eq!(fresh.get("token"), None);
    }

    #[test]
    fn test_ephemeral_store_remove() {
        let store = EphemeralStore::default();
        store.set("token", "abc123");
        store.remove("token");
        assert_eq!(store.get("token"), None);
    }
}
