//! Task record.

use serde::{Deserialize, Serialize};

/// Per-list numeric task identifier. Starts at 1 and is never reused.
pub type TaskId = i64;

/// A titled unit of work scoped to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Name of the owning list. Follows the list on rename.
    #[serde(rename = "ToDoList")]
    pub list_name: String,
    #[serde(rename = "ID")]
    pub id: TaskId,
    /// Unique within the owning list.
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Done")]
    pub done: bool,
}

impl Task {
    /// Creates a not-yet-done task.
    pub fn new(list_name: impl Into<String>, id: TaskId, title: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
            id,
            title: title.into(),
            done: false,
        }
    }
}
