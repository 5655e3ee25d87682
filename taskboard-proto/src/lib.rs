//! Shared data model for `taskboard`: columns, tasks, boards, filters and
//! the drag/drop event surface.

pub mod board;
pub mod codec;
pub mod event;
pub mod filter;
pub mod validate;

pub use board::{
    Board, Column, ColumnId, NewTask, Priority, PriorityLevel, Task, TaskId, TaskPatch,
    normalize_tags,
};
pub use event::{DropEvent, DropIntent};
pub use filter::FilterState;
