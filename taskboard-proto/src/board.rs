//! Board data model.
//!
//! A [`Board`] is a list of [`Column`]s plus a single global sequence of
//! [`Task`]s. There is no per-task position field: the order of a column's
//! tasks is the order in which they appear in the global sequence.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string form of this identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stable identifier of a task.
///
/// Seeded boards carry arbitrary ids (`"t1"`); ids minted at runtime come
/// from [`TaskId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh, time-ordered identifier of the form `task-<uuid v7>`.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("task-{}", Uuid::now_v7()))
    }

    /// Returns the string form of this identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A board column. Column order on the board is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier, stable for the lifetime of the board.
    pub id: ColumnId,
    /// Display label.
    pub title: String,
    /// Maximum number of tasks accepted by cross-column moves.
    /// `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

impl Column {
    /// Creates an unlimited column.
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            wip_limit: None,
        }
    }

    /// Sets the WIP limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: u32) -> Self {
        self.wip_limit = Some(limit);
        self
    }
}

/// How a priority is treated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    /// `P1`.
    High,
    /// `P2`.
    Medium,
    /// `P3`.
    Low,
    /// Anything else; rendered with the default treatment.
    Unknown,
}

/// Task priority.
///
/// The canonical values are `P1`, `P2` and `P3`, but the set is open:
/// unrecognised strings are kept verbatim in [`Priority::Other`] and
/// survive a save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    /// High priority.
    P1,
    /// Medium priority.
    P2,
    /// Low priority (the default for new tasks).
    #[default]
    P3,
    /// Any other value.
    Other(String),
}

impl Priority {
    /// Returns the wire form of this priority.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::Other(s) => s,
        }
    }

    /// Returns the display level.
    #[must_use]
    pub const fn level(&self) -> PriorityLevel {
        match self {
            Self::P1 => PriorityLevel::High,
            Self::P2 => PriorityLevel::Medium,
            Self::P3 => PriorityLevel::Low,
            Self::Other(_) => PriorityLevel::Unknown,
        }
    }

    /// Returns the badge color used by board views.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self.level() {
            PriorityLevel::High => "red",
            PriorityLevel::Medium => "orange",
            PriorityLevel::Low => "green",
            PriorityLevel::Unknown => "gray",
        }
    }

    /// Returns the human-readable label offered by edit forms.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.level() {
            PriorityLevel::High => "High Priority",
            PriorityLevel::Medium => "Medium Priority",
            PriorityLevel::Low => "Low Priority",
            PriorityLevel::Unknown => "Unknown Priority",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P3" => Self::P3,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,
    /// Person the task is assigned to, may be empty.
    #[serde(default)]
    pub assignee: String,
    /// Priority, see [`Priority`].
    #[serde(default)]
    pub priority: Priority,
    /// Labels, without duplicates.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Column the task lives in.
    pub column_id: ColumnId,
}

impl Task {
    /// Returns `true` if the task carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A task payload that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    /// Short title.
    pub title: String,
    /// Free text.
    pub description: String,
    /// Assignee.
    pub assignee: String,
    /// Priority.
    pub priority: Priority,
    /// Labels.
    pub tags: Vec<String>,
    /// Column the task is created in.
    pub column_id: ColumnId,
}

impl NewTask {
    /// Creates a payload with the given title in `column`, defaults elsewhere.
    pub fn new(title: impl Into<String>, column: impl Into<ColumnId>) -> Self {
        Self {
            title: title.into(),
            column_id: column.into(),
            ..Self::default()
        }
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches `id`, producing a full task. Duplicate tags are dropped.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            assignee: self.assignee,
            priority: self.priority,
            tags: normalize_tags(self.tags),
            column_id: self.column_id,
        }
    }
}

/// A partial update for a task. Every `Some` field replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New assignee.
    pub assignee: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New tag list.
    pub tags: Option<Vec<String>>,
    /// New column. Changing the column here bypasses WIP limits.
    pub column_id: Option<ColumnId>,
}

impl TaskPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.column_id.is_none()
    }

    /// Returns `task` with this patch merged in. The id is never changed.
    #[must_use]
    pub fn apply(&self, task: &Task) -> Task {
        let mut merged = task.clone();
        if let Some(title) = &self.title {
            merged.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            merged.description.clone_from(description);
        }
        if let Some(assignee) = &self.assignee {
            merged.assignee.clone_from(assignee);
        }
        if let Some(priority) = &self.priority {
            merged.priority = priority.clone();
        }
        if let Some(tags) = &self.tags {
            merged.tags = normalize_tags(tags.clone());
        }
        if let Some(column_id) = &self.column_id {
            merged.column_id = column_id.clone();
        }
        merged
    }
}

/// Drops repeated tags, keeping the first occurrence of each.
#[must_use]
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// The persisted aggregate: display-ordered columns plus the global task
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Columns in display order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Tasks in global order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    /// Creates a board from its parts.
    #[must_use]
    pub const fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// Looks up a column by id.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns the tasks of `column` in board order, ignoring any filter.
    pub fn tasks_in<'a>(&'a self, column: &'a ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| &t.column_id == column)
    }

    /// Returns `true` if the board has neither columns nor tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }
}
