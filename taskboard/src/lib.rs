//! `taskboard` — kanban board state manager.
//!
//! Columns with WIP limits, tasks kept in one global ordered sequence,
//! filtering, move/reorder semantics, and best-effort persistence to a
//! key-value store.

pub mod board;
pub mod config;
pub mod logging;
pub mod seed;
pub mod store;

pub use board::{
    BoardManager, BoardSnapshot, BoardState, InitSource, NoOpReason, Outcome, SharedBoard,
    TasksByColumn,
};
pub use taskboard_proto::{
    Board, Column, ColumnId, DropEvent, DropIntent, FilterState, NewTask, Priority, Task, TaskId,
    TaskPatch,
};
