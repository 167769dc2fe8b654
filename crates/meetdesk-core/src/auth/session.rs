use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::storage::Storage;

/// Storage key the session snapshot lives under
pub const STORE_KEY: &str = "authStore";

/// Persisted form of the session.
///
/// `is_logged_in` is written for compatibility with existing snapshots but is
/// never trusted on read; the token alone decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub token: String,
    pub is_logged_in: bool,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Read-only session state, as seen by the navigation guard.
pub trait SessionView {
    fn is_authenticated(&self) -> bool;
}

pub struct SessionStore {
    storage: Box<dyn Storage>,
    token: String,
    saved_at: Option<DateTime<Utc>>,
}

impl SessionStore {
    /// Open the store, rehydrating from `storage` if a snapshot exists.
    ///
    /// A missing or unreadable snapshot yields an empty session.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let mut store = Self {
            storage,
            token: String::new(),
            saved_at: None,
        };

        if let Some(snapshot) = store.load() {
            if snapshot.is_logged_in != !snapshot.token.is_empty() {
                warn!(
                    is_logged_in = snapshot.is_logged_in,
                    has_token = !snapshot.token.is_empty(),
                    "Session snapshot flag disagrees with token, using token"
                );
            }
            store.token = snapshot.token;
            store.saved_at = snapshot.saved_at;
        }

        debug!(authenticated = store.is_authenticated(), "Session store opened");
        store
    }

    fn load(&self) -> Option<SessionSnapshot> {
        let contents = match self.storage.read(STORE_KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session snapshot");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "Failed to parse session snapshot, starting empty");
                None
            }
        }
    }

    /// Write the full current state back to storage.
    ///
    /// `saved_at` only moves when the token changed, so repeating a mutation
    /// rewrites the same snapshot. Failures are logged and swallowed; the
    /// in-memory session stays authoritative.
    fn persist(&mut self, changed: bool) {
        let saved_at = if changed { Some(Utc::now()) } else { self.saved_at };
        let snapshot = SessionSnapshot {
            token: self.token.clone(),
            is_logged_in: self.is_authenticated(),
            saved_at,
        };

        let result = serde_json::to_string_pretty(&snapshot)
            .map_err(StorageError::from)
            .and_then(|contents| self.storage.write(STORE_KEY, &contents));

        match result {
            Ok(()) => self.saved_at = snapshot.saved_at,
            Err(e) => warn!(error = %e, "Failed to persist session"),
        }
    }

    /// Replace the session with `token`. Always succeeds.
    pub fn establish(&mut self, token: impl Into<String>) {
        let token = token.into();
        let changed = token != self.token;
        self.token = token;
        self.persist(changed);
        info!("Session established");
    }

    /// Drop the session. Calling this on an empty session changes nothing observable.
    pub fn clear(&mut self) {
        let changed = self.is_authenticated();
        self.token.clear();
        self.persist(changed);
        info!("Session cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// When the session was last written to storage, if ever
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }
}

impl SessionView for SessionStore {
    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("saved_at", &self.saved_at)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn open(storage: &MemoryStorage) -> SessionStore {
        SessionStore::open(Box::new(storage.clone()))
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    /// Storage whose reads always fail
    struct UnreadableStorage(MemoryStorage);

    impl Storage for UnreadableStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            ))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = open(&MemoryStorage::new());
        assert_eq!(store.token(), "");
        assert!(!store.is_authenticated());
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_establish_sets_token() {
        let mut store = open(&MemoryStorage::new());
        store.establish("xyz");
        assert_eq!(store.token(), "xyz");
        assert!(store.is_authenticated());
        assert!(store.saved_at().is_some());
    }

    #[test]
    fn test_establish_overwrites_previous_token() {
        let mut store = open(&MemoryStorage::new());
        store.establish("t1");
        store.establish("t2");
        assert_eq!(store.token(), "t2");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_twice_matches_clear_once() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.establish("abc");

        store.clear();
        let once = (
            store.token().to_string(),
            store.is_authenticated(),
            store.saved_at(),
            storage.read(STORE_KEY).unwrap(),
        );
        store.clear();
        let twice = (
            store.token().to_string(),
            store.is_authenticated(),
            store.saved_at(),
            storage.read(STORE_KEY).unwrap(),
        );

        assert_eq!(once, twice);
        assert_eq!((twice.0.as_str(), twice.1), ("", false));
    }

    #[test]
    fn test_clear_on_fresh_store_keeps_saved_at() {
        let mut store = open(&MemoryStorage::new());
        store.clear();
        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_establish_same_token_keeps_saved_at() {
        let mut store = open(&MemoryStorage::new());
        store.establish("abc");
        let first = store.saved_at();
        store.establish("abc");
        assert_eq!(store.saved_at(), first);
    }

    #[test]
    fn test_read_failure_starts_empty() {
        let storage = MemoryStorage::new();
        storage
            .write(STORE_KEY, r#"{"token":"hidden","isLoggedIn":true}"#)
            .unwrap();

        let mut store = SessionStore::open(Box::new(UnreadableStorage(storage.clone())));
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), "");

        store.establish("x");
        assert!(store.is_authenticated());
        assert!(storage.read(STORE_KEY).unwrap().unwrap().contains("\"x\""));
    }

    #[test]
    fn test_establish_then_clear_is_anonymous() {
        for token in ["a", "abc123", "token with spaces", "ünïcødé"] {
            let mut store = open(&MemoryStorage::new());
            store.establish(token);
            store.clear();
            assert_eq!(store.token(), "");
            assert!(!store.is_authenticated());
        }
    }

    #[test]
    fn test_session_survives_restart() {
        let storage = MemoryStorage::new();
        {
            let mut store = open(&storage);
            store.establish("abc123");
        }

        let store = open(&storage);
        assert_eq!(store.token(), "abc123");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_cleared_session_survives_restart() {
        let storage = MemoryStorage::new();
        {
            let mut store = open(&storage);
            store.establish("abc123");
            store.clear();
        }

        let store = open(&storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_snapshot_written_in_camel_case() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.establish("abc123");

        let raw = storage.read(STORE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["token"], "abc123");
        assert_eq!(value["isLoggedIn"], true);
        assert!(value["savedAt"].is_string());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.write(STORE_KEY, "{not json").unwrap();

        let store = open(&storage);
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), "");
    }

    #[test]
    fn test_snapshot_without_saved_at_loads() {
        let storage = MemoryStorage::new();
        storage
            .write(STORE_KEY, r#"{"token":"legacy","isLoggedIn":true}"#)
            .unwrap();

        let store = open(&storage);
        assert_eq!(store.token(), "legacy");
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_desynchronized_flag_is_ignored() {
        let storage = MemoryStorage::new();
        storage
            .write(STORE_KEY, r#"{"token":"","isLoggedIn":true}"#)
            .unwrap();
        assert!(!open(&storage).is_authenticated());

        storage
            .write(STORE_KEY, r#"{"token":"hand-edited","isLoggedIn":false}"#)
            .unwrap();
        assert!(open(&storage).is_authenticated());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = SessionStore::open(Box::new(ReadOnlyStorage));
        store.establish("abc");

        assert!(store.is_authenticated());
        assert_eq!(store.token(), "abc");
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = SessionStore::open(Box::new(FileStorage::new(dir.path().to_path_buf())));
            store.establish("abc123");
        }

        let store = SessionStore::open(Box::new(FileStorage::new(dir.path().to_path_buf())));
        assert_eq!(store.token(), "abc123");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_debug_hides_token() {
        let mut store = open(&MemoryStorage::new());
        store.establish("secret-token");
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("authenticated: true"));
    }
}
