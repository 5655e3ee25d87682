//! Board state management.
//!
//! [`BoardState`] holds the current board snapshot, the filter selection and
//! the memoised views derived from them. [`BoardManager`] adds the
//! load-or-seed start-up sequence, persistence after every change and
//! change notification. [`SharedBoard`] serialises access for concurrent
//! callers.
//!
//! Mutations never fail loudly. An unknown id, a full column or an empty
//! reorder leaves the board untouched and reports
//! [`Outcome::Unchanged`] with the reason; callers are free to ignore it.

pub mod manager;
pub mod ordering;
pub mod shared;
pub mod state;
pub mod views;
pub mod wip;

pub use manager::{BoardManager, BoardSnapshot, DEFAULT_STORAGE_KEY, InitSource};
pub use shared::SharedBoard;
pub use state::BoardState;
pub use views::TasksByColumn;
pub use wip::{is_at_wip_limit, is_near_wip_limit};

use std::fmt;

/// Why a mutation left the board as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The board has not finished loading.
    NotInitialized,
    /// No task has the given id.
    TaskNotFound,
    /// No column has the given id.
    ColumnNotFound,
    /// The target column is already at its WIP limit.
    WipLimitReached,
    /// The column holds fewer than two tasks.
    NothingToReorder,
    /// Source and destination index are the same.
    SameIndex,
    /// The update would not change the task.
    NothingChanged,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotInitialized => "board not initialized",
            Self::TaskNotFound => "task not found",
            Self::ColumnNotFound => "column not found",
            Self::WipLimitReached => "wip limit reached",
            Self::NothingToReorder => "nothing to reorder",
            Self::SameIndex => "same index",
            Self::NothingChanged => "nothing changed",
        };
        f.write_str(text)
    }
}

/// Result of a board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new snapshot replaced the previous one.
    Applied,
    /// The snapshot was left as it was.
    Unchanged(NoOpReason),
}

impl Outcome {
    /// Returns `true` if the mutation produced a new snapshot.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
