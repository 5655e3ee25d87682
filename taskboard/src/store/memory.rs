//! Process-local [`KeyValueStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{KeyValueStore, StoreError};

/// In-memory store backed by a `HashMap`.
///
/// Nothing survives the process. The store can be switched to
/// "unavailable" to reproduce environments where storage is blocked.
#[derive(Debug)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Creates a store that refuses every operation.
    #[must_use]
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    /// Toggles availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store disabled".to_string()))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.lock().remove(key);
        Ok(())
    }
}
