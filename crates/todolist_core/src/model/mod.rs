//! Domain model for ToDo lists and their tasks.
//!
//! # Responsibility
//! - Define the records owned by every store backend.
//! - Provide input validation shared by all write paths.
//!
//! # Invariants
//! - A list name and a task title are never blank.
//! - `ToDoList::task_number()` always equals `ToDoList::tasks().len()`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod task;
pub mod todo_list;

/// Input validation failure raised before any store state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A mandatory field was empty or whitespace only.
    EmptyField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "empty mandatory parameter: {field}"),
        }
    }
}

impl Error for ValidationError {}

/// Returns `true` when `value` carries no usable characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Rejects blank values for the named field.
pub fn require_field(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
