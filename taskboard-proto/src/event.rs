//! Drag-and-drop events as the board state manager sees them.
//!
//! A gesture library is expected to translate a completed drop into a
//! [`DropEvent`]; nothing here depends on how the gesture was performed.

use serde::{Deserialize, Serialize};

use crate::board::{ColumnId, TaskId};

/// A completed drop of a task card.
///
/// Indices count the cards the surface was showing, i.e. the column's
/// filtered bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEvent {
    /// Column the card was dragged out of.
    pub source_column_id: ColumnId,
    /// Column the card was dropped into.
    pub target_column_id: ColumnId,
    /// The dragged task.
    pub task_id: TaskId,
    /// Index of the card in the source column before the drag.
    pub previous_index: usize,
    /// Index the card was dropped at among the target column's visible cards.
    pub target_index: usize,
}

/// What a [`DropEvent`] asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// Move to another column.
    Move,
    /// Reorder within the same column.
    Reorder,
    /// Dropped back where it started.
    Ignore,
}

impl DropEvent {
    /// Classifies the drop.
    #[must_use]
    pub fn intent(&self) -> DropIntent {
        if self.source_column_id != self.target_column_id {
            DropIntent::Move
        } else if self.previous_index == self.target_index {
            DropIntent::Ignore
        } else {
            DropIntent::Reorder
        }
    }
}
