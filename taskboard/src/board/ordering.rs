//! Positional moves over the global task sequence.
//!
//! A column's order is the order of its tasks in the global sequence, so
//! every move is a splice of that sequence. Both functions are pure: they
//! return the new sequence, or the reason nothing would change.
//!
//! Indices count the column's full subsequence, ignoring any active filter.
//! A drag surface only sees the filtered bucket; [`column_index_of_visible`]
//! translates its indices.

use taskboard_proto::{ColumnId, Task, TaskId};

use super::NoOpReason;

/// Global positions of the tasks in `column`, in order.
fn column_slots(tasks: &[Task], column: &ColumnId) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| &t.column_id == column)
        .map(|(i, _)| i)
        .collect()
}

/// Moves `task_id` into `target` so that it ends up at `target_index` among
/// the target column's tasks.
///
/// With `target_index` absent or not smaller than the column's task count
/// the task goes right after the column's last task (or to the end of the
/// sequence if the column is empty). Otherwise it is inserted immediately
/// before the task currently at `target_index`. Every other task keeps its
/// relative order.
///
/// # Errors
///
/// Returns [`NoOpReason::TaskNotFound`] if `task_id` is not in `tasks`.
pub fn move_to_column(
    tasks: &[Task],
    task_id: &TaskId,
    target: &ColumnId,
    target_index: Option<usize>,
) -> Result<Vec<Task>, NoOpReason> {
    let from = tasks
        .iter()
        .position(|t| &t.id == task_id)
        .ok_or(NoOpReason::TaskNotFound)?;

    let mut next = tasks.to_vec();
    let mut moving = next.remove(from);
    moving.column_id = target.clone();

    let slots = column_slots(&next, target);
    let at = match target_index {
        Some(index) if index < slots.len() => slots[index],
        _ => slots.last().map_or(next.len(), |last| last + 1),
    };
    next.insert(at, moving);
    Ok(next)
}

/// Moves the task at `previous` to `current` within `column`'s
/// subsequence.
///
/// Both indices are clamped to the column's range. The permuted
/// subsequence is written back into the same global slots the column
/// occupied, so tasks of other columns do not move at all.
///
/// # Errors
///
/// Returns [`NoOpReason::NothingToReorder`] for columns with fewer than two
/// tasks and [`NoOpReason::SameIndex`] when the (clamped) indices are equal.
pub fn reorder_within_column(
    tasks: &[Task],
    column: &ColumnId,
    previous: usize,
    current: usize,
) -> Result<Vec<Task>, NoOpReason> {
    let slots = column_slots(tasks, column);
    if slots.len() < 2 {
        return Err(NoOpReason::NothingToReorder);
    }
    let last = slots.len() - 1;
    let from = previous.min(last);
    let to = current.min(last);
    if from == to {
        return Err(NoOpReason::SameIndex);
    }

    let mut column_tasks: Vec<Task> = slots.iter().map(|&i| tasks[i].clone()).collect();
    let moved = column_tasks.remove(from);
    column_tasks.insert(to, moved);

    let mut next = tasks.to_vec();
    for (slot, task) in slots.into_iter().zip(column_tasks) {
        next[slot] = task;
    }
    Ok(next)
}

/// Position of `task_id` within `column`'s subsequence.
#[must_use]
pub fn column_position(tasks: &[Task], column: &ColumnId, task_id: &TaskId) -> Option<usize> {
    tasks
        .iter()
        .filter(|t| &t.column_id == column)
        .position(|t| &t.id == task_id)
}

/// Translates `visible_index`, an index into the filtered bucket `visible`
/// of `column`, into an index into the column's full subsequence.
///
/// `moving` is left out of both sequences, matching how
/// [`move_to_column`] and [`reorder_within_column`] count the target slot
/// once the dragged task has been lifted out. The result is the position
/// of the visible task the drop lands in front of, or `None` when the drop
/// lands after the last visible task.
#[must_use]
pub fn column_index_of_visible(
    tasks: &[Task],
    visible: &[Task],
    column: &ColumnId,
    moving: &TaskId,
    visible_index: usize,
) -> Option<usize> {
    let anchor = visible
        .iter()
        .filter(|t| &t.id != moving)
        .nth(visible_index)?;
    tasks
        .iter()
        .filter(|t| &t.column_id == column && &t.id != moving)
        .position(|t| t.id == anchor.id)
}
