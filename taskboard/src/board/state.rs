//! In-memory board state with memoised views.

use std::cell::OnceCell;
use std::sync::Arc;

use taskboard_proto::{Board, Column, ColumnId, FilterState, NewTask, Task, TaskId, TaskPatch};

use super::views::{self, TasksByColumn};
use super::{NoOpReason, Outcome, ordering, wip};

/// The current board snapshot plus the filter selection.
///
/// Every applied mutation swaps in a fresh `Arc<Board>` and bumps the
/// revision; the previous snapshot is never modified. Derived views are
/// computed on first access and dropped whenever the board or the filters
/// change.
#[derive(Debug, Default)]
pub struct BoardState {
    board: Arc<Board>,
    filters: FilterState,
    revision: u64,
    filtered: OnceCell<Vec<Task>>,
    grouped: OnceCell<TasksByColumn>,
}

impl BoardState {
    /// Creates state holding `board` with no filters.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board: Arc::new(board),
            ..Self::default()
        }
    }

    /// The current snapshot.
    #[must_use]
    pub const fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    /// All tasks in global order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    /// The active filter selection.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Counter bumped on every board or filter change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Tasks matching the active filters, in global order.
    pub fn filtered_tasks(&self) -> &[Task] {
        self.filtered
            .get_or_init(|| views::filtered_tasks(&self.board.tasks, &self.filters))
    }

    /// Filtered tasks grouped by column.
    pub fn tasks_by_column(&self) -> &TasksByColumn {
        self.grouped
            .get_or_init(|| TasksByColumn::build(&self.board.columns, self.filtered_tasks()))
    }

    /// Distinct assignees across all tasks (for filter pickers).
    #[must_use]
    pub fn unique_assignees(&self) -> Vec<String> {
        views::unique_assignees(&self.board.tasks)
    }

    /// Distinct priorities across all tasks.
    #[must_use]
    pub fn unique_priorities(&self) -> Vec<String> {
        views::unique_priorities(&self.board.tasks)
    }

    /// Distinct tags across all tasks.
    #[must_use]
    pub fn unique_tags(&self) -> Vec<String> {
        views::unique_tags(&self.board.tasks)
    }

    /// Whether `column` is full, counting the tasks currently visible in it.
    /// Unknown columns are never full.
    pub fn is_at_wip_limit(&self, column: &ColumnId) -> bool {
        self.board
            .column(column)
            .is_some_and(|c| wip::is_at_wip_limit(c, self.tasks_by_column().count(column)))
    }

    /// Whether `column` is one task short of its limit.
    pub fn is_near_wip_limit(&self, column: &ColumnId) -> bool {
        self.board
            .column(column)
            .is_some_and(|c| wip::is_near_wip_limit(c, self.tasks_by_column().count(column)))
    }

    /// Position of `id` among all tasks of `column`, filtered or not.
    #[must_use]
    pub fn column_position(&self, column: &ColumnId, id: &TaskId) -> Option<usize> {
        ordering::column_position(&self.board.tasks, column, id)
    }

    /// Translates an index into the visible bucket of `column` into an
    /// index into its full subsequence, with `moving` lifted out.
    /// `None` means after the last visible task.
    #[must_use]
    pub fn column_index_of_visible(
        &self,
        column: &ColumnId,
        moving: &TaskId,
        visible_index: usize,
    ) -> Option<usize> {
        ordering::column_index_of_visible(
            &self.board.tasks,
            self.tasks_by_column().get(column),
            column,
            moving,
            visible_index,
        )
    }

    /// Replaces the whole board (used when loading or seeding).
    pub fn replace_board(&mut self, board: Board) {
        self.board = Arc::new(board);
        self.invalidate();
    }

    /// Appends a new task to the global sequence and returns its id.
    ///
    /// WIP limits are not checked here; they only guard cross-column moves.
    pub fn create_task(&mut self, task: NewTask) -> TaskId {
        let id = TaskId::generate();
        let mut tasks = self.board.tasks.clone();
        tasks.push(task.into_task(id.clone()));
        self.replace_tasks(tasks);
        id
    }

    /// Merges `patch` into the task with `id`, keeping its position.
    pub fn update_task(&mut self, id: &TaskId, patch: &TaskPatch) -> Outcome {
        let Some(index) = self.board.tasks.iter().position(|t| &t.id == id) else {
            return Outcome::Unchanged(NoOpReason::TaskNotFound);
        };
        let merged = patch.apply(&self.board.tasks[index]);
        if merged == self.board.tasks[index] {
            return Outcome::Unchanged(NoOpReason::NothingChanged);
        }
        let mut tasks = self.board.tasks.clone();
        tasks[index] = merged;
        self.replace_tasks(tasks);
        Outcome::Applied
    }

    /// Removes the task with `id`.
    pub fn delete_task(&mut self, id: &TaskId) -> Outcome {
        if self.board.task(id).is_none() {
            return Outcome::Unchanged(NoOpReason::TaskNotFound);
        }
        let tasks = self
            .board
            .tasks
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();
        self.replace_tasks(tasks);
        Outcome::Applied
    }

    /// Moves a task into `target` at `target_index` among that column's
    /// tasks; see [`ordering::move_to_column`] for the index rules.
    ///
    /// The move is refused when the target column declares a WIP limit and
    /// its visible task count has already reached it.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        target: &ColumnId,
        target_index: Option<usize>,
    ) -> Outcome {
        let Some(column) = self.board.column(target) else {
            return Outcome::Unchanged(NoOpReason::ColumnNotFound);
        };
        let full = wip::is_at_wip_limit(column, self.tasks_by_column().count(target));
        if full {
            return Outcome::Unchanged(NoOpReason::WipLimitReached);
        }
        match ordering::move_to_column(&self.board.tasks, id, target, target_index) {
            Ok(tasks) => {
                self.replace_tasks(tasks);
                Outcome::Applied
            }
            Err(reason) => Outcome::Unchanged(reason),
        }
    }

    /// Moves the task at `previous` to `current` within `column`.
    pub fn reorder_task(&mut self, column: &ColumnId, previous: usize, current: usize) -> Outcome {
        if previous == current {
            return Outcome::Unchanged(NoOpReason::SameIndex);
        }
        match ordering::reorder_within_column(&self.board.tasks, column, previous, current) {
            Ok(tasks) => {
                self.replace_tasks(tasks);
                Outcome::Applied
            }
            Err(reason) => Outcome::Unchanged(reason),
        }
    }

    /// Replaces the filter selection wholesale.
    pub fn update_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.invalidate();
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.update_filters(FilterState::default());
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.board = Arc::new(Board::new(self.board.columns.clone(), tasks));
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.revision += 1;
        self.filtered = OnceCell::new();
        self.grouped = OnceCell::new();
    }
}
