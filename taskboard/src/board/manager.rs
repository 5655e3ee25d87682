//! Board manager: start-up, persistence and change notification.
//!
//! `BoardManager` is the application-layer entry point. It owns a
//! [`BoardState`], restores it from storage (or a seed) once, writes every
//! applied mutation back to storage and publishes a [`BoardSnapshot`] to
//! subscribers after each change.

use std::sync::Arc;

use taskboard_proto::{Board, ColumnId, DropEvent, DropIntent, FilterState, NewTask, TaskId, TaskPatch};
use tokio::sync::watch;

use super::state::BoardState;
use super::{NoOpReason, Outcome};
use crate::seed::SeedSource;
use crate::store::{BoardStorage, KeyValueStore};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "board";

/// Where the board came from during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    /// A persisted snapshot was found and adopted.
    Restored,
    /// Nothing was persisted; the seed was fetched and saved.
    Seeded,
    /// Nothing was persisted and the seed failed; the board is empty.
    Empty,
}

/// What subscribers receive after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Revision of the state that produced this snapshot.
    pub revision: u64,
    /// The board at that revision.
    pub board: Arc<Board>,
    /// The filter selection at that revision.
    pub filters: FilterState,
}

/// Owns the board state and keeps storage and subscribers in sync with it.
///
/// All mutations are rejected with [`NoOpReason::NotInitialized`] until
/// [`initialize`](Self::initialize) has completed, so a late seed can never
/// overwrite changes made in the meantime.
pub struct BoardManager<S> {
    state: BoardState,
    storage: BoardStorage<S>,
    key: String,
    init_source: Option<InitSource>,
    snapshot_tx: watch::Sender<BoardSnapshot>,
}

impl<S: KeyValueStore> BoardManager<S> {
    /// Creates an uninitialized manager persisting under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates an uninitialized manager persisting under `key`.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        let state = BoardState::default();
        let (snapshot_tx, _) = watch::channel(snapshot_of(&state));
        Self {
            state,
            storage: BoardStorage::new(store),
            key: key.into(),
            init_source: None,
            snapshot_tx,
        }
    }

    /// Loads the persisted board, or fetches and persists the seed when
    /// nothing is stored.
    ///
    /// A failing seed leaves the board empty. Calling this again after it
    /// has completed returns the original outcome without touching storage
    /// or the seed.
    pub async fn initialize<Seed: SeedSource>(&mut self, seed: &Seed) -> InitSource {
        if let Some(source) = self.init_source {
            return source;
        }

        let source = if let Some(board) = self.storage.load_state::<Board>(&self.key) {
            self.state.replace_board(board);
            InitSource::Restored
        } else {
            match seed.fetch().await {
                Ok(board) => {
                    self.state.replace_board(board);
                    self.persist();
                    InitSource::Seeded
                }
                Err(err) => {
                    tracing::warn!(error = %err, "seed fetch failed, starting with an empty board");
                    InitSource::Empty
                }
            }
        };

        self.init_source = Some(source);
        tracing::info!(
            source = ?source,
            columns = self.state.columns().len(),
            tasks = self.state.tasks().len(),
            "board initialized"
        );
        self.publish();
        source
    }

    /// Returns `true` once [`initialize`](Self::initialize) has completed.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.init_source.is_some()
    }

    /// How the board was initialized, if it has been.
    #[must_use]
    pub const fn init_source(&self) -> Option<InitSource> {
        self.init_source
    }

    /// Read access to the state and its derived views.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// The key the board is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshots published after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Whether `column` has reached its WIP limit (visible tasks only).
    #[must_use]
    pub fn is_at_wip_limit(&self, column: &ColumnId) -> bool {
        self.state.is_at_wip_limit(column)
    }

    /// Whether `column` is one task below its WIP limit.
    #[must_use]
    pub fn is_near_wip_limit(&self, column: &ColumnId) -> bool {
        self.state.is_near_wip_limit(column)
    }

    /// Appends a new task and returns its id, or `None` before
    /// initialization.
    pub fn create_task(&mut self, task: NewTask) -> Option<TaskId> {
        if !self.accepts_mutations("create_task") {
            return None;
        }
        let id = self.state.create_task(task);
        self.commit("create_task", Outcome::Applied);
        Some(id)
    }

    /// Creates a task in the first column, whatever `task.column_id` says.
    ///
    /// Returns `None` before initialization or when the board has no
    /// columns.
    pub fn create_task_in_first_column(&mut self, mut task: NewTask) -> Option<TaskId> {
        let first = self.state.columns().first()?.id.clone();
        task.column_id = first;
        self.create_task(task)
    }

    /// Merges `patch` into the task with `id`.
    pub fn update_task(&mut self, id: &TaskId, patch: &TaskPatch) -> Outcome {
        if !self.accepts_mutations("update_task") {
            return Outcome::Unchanged(NoOpReason::NotInitialized);
        }
        let outcome = self.state.update_task(id, patch);
        self.commit("update_task", outcome)
    }

    /// Deletes the task with `id`.
    pub fn delete_task(&mut self, id: &TaskId) -> Outcome {
        if !self.accepts_mutations("delete_task") {
            return Outcome::Unchanged(NoOpReason::NotInitialized);
        }
        let outcome = self.state.delete_task(id);
        self.commit("delete_task", outcome)
    }

    /// Moves a task to another column, subject to the target's WIP limit.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        target: &ColumnId,
        target_index: Option<usize>,
    ) -> Outcome {
        if !self.accepts_mutations("move_task") {
            return Outcome::Unchanged(NoOpReason::NotInitialized);
        }
        let outcome = self.state.move_task(id, target, target_index);
        self.commit("move_task", outcome)
    }

    /// Moves the task at `previous` to `current` within `column`.
    ///
    /// Indices count the column's full subsequence. The task at `previous`
    /// must be `id`, otherwise nothing moves and the outcome is
    /// [`NoOpReason::TaskNotFound`].
    pub fn reorder_task(
        &mut self,
        id: &TaskId,
        column: &ColumnId,
        previous: usize,
        current: usize,
    ) -> Outcome {
        if !self.accepts_mutations("reorder_task") {
            return Outcome::Unchanged(NoOpReason::NotInitialized);
        }
        tracing::trace!(task = %id, column = %column, previous, current, "reorder requested");
        let held = self.state.board().tasks_in(column).count();
        if held >= 2 && self.state.column_position(column, id) != Some(previous) {
            tracing::debug!(task = %id, column = %column, previous, "reorder source mismatch");
            return Outcome::Unchanged(NoOpReason::TaskNotFound);
        }
        let outcome = self.state.reorder_task(column, previous, current);
        self.commit("reorder_task", outcome)
    }

    /// Applies a drop from the drag-and-drop surface.
    ///
    /// The surface renders the filtered buckets, so `target_index` counts
    /// visible tasks only. The dragged task is located by `task_id` and the
    /// target index is translated to the full column before applying.
    pub fn handle_drop(&mut self, event: &DropEvent) -> Outcome {
        if !self.accepts_mutations("handle_drop") {
            return Outcome::Unchanged(NoOpReason::NotInitialized);
        }
        match event.intent() {
            DropIntent::Move => {
                let target_index = self.state.column_index_of_visible(
                    &event.target_column_id,
                    &event.task_id,
                    event.target_index,
                );
                self.move_task(&event.task_id, &event.target_column_id, target_index)
            }
            DropIntent::Reorder => {
                let column = &event.source_column_id;
                let Some(previous) = self.state.column_position(column, &event.task_id) else {
                    return Outcome::Unchanged(NoOpReason::TaskNotFound);
                };
                // past the last visible task: clamped to the end of the column
                let current = self
                    .state
                    .column_index_of_visible(column, &event.task_id, event.target_index)
                    .unwrap_or(usize::MAX);
                self.reorder_task(&event.task_id, column, previous, current)
            }
            DropIntent::Ignore => Outcome::Unchanged(NoOpReason::SameIndex),
        }
    }

    /// Replaces the filter selection. Filters are never persisted.
    pub fn update_filters(&mut self, filters: FilterState) {
        self.state.update_filters(filters);
        self.publish();
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.state.clear_filters();
        self.publish();
    }

    /// Removes the persisted board. The in-memory board is kept.
    ///
    /// Returns `false` if storage is unavailable or the removal failed.
    pub fn clear_persisted(&self) -> bool {
        self.storage.clear_state(&self.key)
    }

    fn accepts_mutations(&self, op: &'static str) -> bool {
        if self.is_initialized() {
            return true;
        }
        tracing::debug!(op, "mutation rejected before initialization");
        false
    }

    fn commit(&mut self, op: &'static str, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::Applied => {
                let saved = self.persist();
                tracing::debug!(op, revision = self.state.revision(), saved, "board updated");
                self.publish();
            }
            Outcome::Unchanged(reason) => {
                tracing::debug!(op, %reason, "board unchanged");
            }
        }
        outcome
    }

    fn persist(&self) -> bool {
        self.storage.save_state(&self.key, self.state.board().as_ref())
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(snapshot_of(&self.state));
    }
}

fn snapshot_of(state: &BoardState) -> BoardSnapshot {
    BoardSnapshot {
        revision: state.revision(),
        board: Arc::clone(state.board()),
        filters: state.filters().clone(),
    }
}
