//! Work-in-progress limit predicates.
//!
//! Views use these to decide whether a column should accept a drag; the
//! state manager applies the same rule when a task is moved across columns.

use taskboard_proto::Column;

fn limit_of(column: &Column) -> Option<usize> {
    column
        .wip_limit
        .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Returns `true` if `column` declares a limit and already holds `count`
/// tasks or more.
#[must_use]
pub fn is_at_wip_limit(column: &Column, count: usize) -> bool {
    limit_of(column).is_some_and(|limit| count >= limit)
}

/// Returns `true` if one more task would bring `column` to its limit.
#[must_use]
pub fn is_near_wip_limit(column: &Column, count: usize) -> bool {
    limit_of(column)
        .and_then(|limit| limit.checked_sub(1))
        .is_some_and(|threshold| count == threshold)
}
