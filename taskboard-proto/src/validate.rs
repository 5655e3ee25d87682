//! Validation applied where users edit tasks.
//!
//! The board state manager accepts any payload; these checks belong to the
//! edit boundary in front of it.

use thiserror::Error;

use crate::board::NewTask;

/// Minimum title length in characters.
pub const MIN_TASK_TITLE_LENGTH: usize = 3;

/// Reasons a task payload is rejected at the edit boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty.
    #[error("title is required")]
    TitleRequired,
    /// The title is shorter than [`MIN_TASK_TITLE_LENGTH`].
    #[error("title must be at least {MIN_TASK_TITLE_LENGTH} characters")]
    TitleTooShort,
}

/// Checks a task title.
///
/// # Errors
///
/// Returns [`TaskValidationError::TitleRequired`] for an empty title and
/// [`TaskValidationError::TitleTooShort`] for fewer than three characters.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    let len = title.chars().count();
    if len == 0 {
        return Err(TaskValidationError::TitleRequired);
    }
    if len < MIN_TASK_TITLE_LENGTH {
        return Err(TaskValidationError::TitleTooShort);
    }
    Ok(())
}

impl NewTask {
    /// Validates the payload as an edit form would.
    ///
    /// # Errors
    ///
    /// See [`validate_title`].
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}
