//! Views derived from a board snapshot and a filter selection.

use taskboard_proto::{Column, ColumnId, FilterState, Task};

/// Returns the tasks matching every active filter dimension, in board order.
#[must_use]
pub fn filtered_tasks(tasks: &[Task], filters: &FilterState) -> Vec<Task> {
    if filters.is_empty() {
        return tasks.to_vec();
    }
    tasks.iter().filter(|t| filters.matches(t)).cloned().collect()
}

/// Filtered tasks grouped by column.
///
/// There is one bucket per board column, in column display order; each
/// bucket keeps the relative order of the filtered sequence. Tasks whose
/// column does not exist appear in no bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TasksByColumn {
    buckets: Vec<(ColumnId, Vec<Task>)>,
}

impl TasksByColumn {
    /// Groups `filtered` by the ids in `columns`.
    #[must_use]
    pub fn build(columns: &[Column], filtered: &[Task]) -> Self {
        let buckets = columns
            .iter()
            .map(|column| {
                let tasks = filtered
                    .iter()
                    .filter(|t| t.column_id == column.id)
                    .cloned()
                    .collect();
                (column.id.clone(), tasks)
            })
            .collect();
        Self { buckets }
    }

    /// Tasks of `column`; empty for unknown columns.
    #[must_use]
    pub fn get(&self, column: &ColumnId) -> &[Task] {
        self.buckets
            .iter()
            .find(|(id, _)| id == column)
            .map(|(_, tasks)| tasks.as_slice())
            .unwrap_or_default()
    }

    /// Number of tasks in `column`'s bucket.
    #[must_use]
    pub fn count(&self, column: &ColumnId) -> usize {
        self.get(column).len()
    }

    /// Iterates buckets in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, &[Task])> {
        self.buckets.iter().map(|(id, tasks)| (id, tasks.as_slice()))
    }

    /// Number of buckets (equal to the number of columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if the board has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn unique_by<'a, F>(tasks: &'a [Task], mut values: F) -> Vec<String>
where
    F: FnMut(&'a Task) -> Vec<&'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for task in tasks {
        for value in values(task) {
            if !value.is_empty() && !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
    }
    seen
}

/// Distinct non-empty assignees, in first-seen order.
#[must_use]
pub fn unique_assignees(tasks: &[Task]) -> Vec<String> {
    unique_by(tasks, |t| vec![t.assignee.as_str()])
}

/// Distinct priority strings, in first-seen order.
#[must_use]
pub fn unique_priorities(tasks: &[Task]) -> Vec<String> {
    unique_by(tasks, |t| vec![t.priority.as_str()])
}

/// Distinct tags across all tasks, in first-seen order.
#[must_use]
pub fn unique_tags(tasks: &[Task]) -> Vec<String> {
    unique_by(tasks, |t| t.tags.iter().map(String::as_str).collect())
}
