//! Filter criteria applied to the board's task sequence.

use serde::{Deserialize, Serialize};

use crate::board::Task;

/// Current filter selection.
///
/// Each dimension is a single value. `None` and `Some("")` both mean "no
/// constraint"; the non-empty dimensions combine with AND. Filters are
/// session state and are never persisted with the board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Exact assignee to keep.
    pub assignee: Option<String>,
    /// Exact priority string to keep.
    pub priority: Option<String>,
    /// Tag that kept tasks must carry.
    pub tag: Option<String>,
}

fn active(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl FilterState {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks assigned to `assignee`.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Restricts to tasks with exactly this priority string.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Restricts to tasks tagged with `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns `true` if no dimension constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        active(self.assignee.as_ref()).is_none()
            && active(self.priority.as_ref()).is_none()
            && active(self.tag.as_ref()).is_none()
    }

    /// Returns `true` if `task` satisfies every active dimension.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = active(self.assignee.as_ref())
            && task.assignee != assignee
        {
            return false;
        }
        if let Some(priority) = active(self.priority.as_ref())
            && task.priority.as_str() != priority
        {
            return false;
        }
        if let Some(tag) = active(self.tag.as_ref())
            && !task.has_tag(tag)
        {
            return false;
        }
        true
    }
}
