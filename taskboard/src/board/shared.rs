//! Shared handle for concurrent callers.

use std::sync::Arc;

use taskboard_proto::{DropEvent, NewTask, TaskId};
use tokio::sync::{Mutex, watch};

use super::Outcome;
use super::manager::{BoardManager, BoardSnapshot, InitSource};
use crate::seed::SeedSource;
use crate::store::KeyValueStore;

/// Cloneable handle serialising every operation through one lock.
///
/// Each mutation reads the current snapshot, publishes a new one and then
/// persists it; holding the lock for the whole sequence keeps concurrent
/// callers from interleaving those steps.
pub struct SharedBoard<S> {
    inner: Arc<Mutex<BoardManager<S>>>,
}

impl<S> Clone for SharedBoard<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedBoard<S> {
    /// Wraps `manager`.
    #[must_use]
    pub fn new(manager: BoardManager<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Runs [`BoardManager::initialize`] under the lock. Callers queued
    /// behind it observe the initialized board.
    pub async fn initialize<Seed: SeedSource>(&self, seed: &Seed) -> InitSource {
        self.inner.lock().await.initialize(seed).await
    }

    /// Runs `f` with exclusive access to the manager.
    pub async fn with<R>(&self, f: impl FnOnce(&mut BoardManager<S>) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }

    /// Creates a task; see [`BoardManager::create_task`].
    pub async fn create_task(&self, task: NewTask) -> Option<TaskId> {
        self.with(|board| board.create_task(task)).await
    }

    /// Applies a drop; see [`BoardManager::handle_drop`].
    pub async fn handle_drop(&self, event: &DropEvent) -> Outcome {
        self.with(|board| board.handle_drop(event)).await
    }

    /// The latest published snapshot.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Subscribes to snapshot changes.
    pub async fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.inner.lock().await.subscribe()
    }
}
