//! Key-value persistence for board snapshots.
//!
//! Defines the [`KeyValueStore`] trait implemented by storage backends and
//! [`BoardStorage`], which layers typed JSON state on top of a store and
//! turns every failure into a `false`/`None` result.
//!
//! Storage may be missing entirely (sandboxed or quota-limited
//! environments). Losing durability is acceptable; crashing the board is
//! not, so nothing in [`BoardStorage`] returns an error.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use taskboard_proto::codec;

/// Errors reported by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage backend cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// The key cannot be stored by this backend.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// A string-to-string store.
///
/// Implementations include:
/// - [`InMemoryStore`] — process-local map, used in tests and demos
/// - [`FileStore`] — one file per key in a directory
pub trait KeyValueStore: Send + Sync {
    /// Returns `true` if the store can currently be written to.
    fn is_available(&self) -> bool;

    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Typed, non-failing access to a [`KeyValueStore`].
///
/// Values are stored as JSON text. Any problem (store unavailable, I/O
/// error, undecodable payload) is logged via `tracing::warn!` and reported
/// as `false` or `None`.
#[derive(Debug)]
pub struct BoardStorage<S> {
    store: S,
}

impl<S: KeyValueStore> BoardStorage<S> {
    /// Wraps `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Serializes `state` and stores it under `key`.
    ///
    /// Returns `true` on success.
    pub fn save_state<T: Serialize + ?Sized>(&self, key: &str, state: &T) -> bool {
        if !self.store.is_available() {
            tracing::warn!(key, "storage unavailable, state not saved");
            return false;
        }
        let text = match codec::encode(state) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(key, error = %err, "could not encode state");
                return false;
            }
        };
        match self.store.set(key, &text) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key, error = %err, "state save failed");
                false
            }
        }
    }

    /// Loads and decodes the value stored under `key`.
    ///
    /// Returns `None` if nothing is stored, the store is unavailable, or
    /// the stored text does not decode as `T`.
    pub fn load_state<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.store.is_available() {
            tracing::warn!(key, "storage unavailable, nothing loaded");
            return None;
        }
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "state load failed");
                return None;
            }
        };
        match codec::decode(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored state is not decodable");
                None
            }
        }
    }

    /// Removes the value stored under `key`.
    ///
    /// Returns `true` on success.
    pub fn clear_state(&self, key: &str) -> bool {
        if !self.store.is_available() {
            tracing::warn!(key, "storage unavailable, state not cleared");
            return false;
        }
        match self.store.remove(key) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key, error = %err, "state clear failed");
                false
            }
        }
    }
}
