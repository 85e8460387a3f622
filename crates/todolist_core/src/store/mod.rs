//! Storage contract for lists and tasks, plus its two backends.
//!
//! # Responsibility
//! - Define the one CRUD contract the service and HTTP layer depend on.
//! - Translate backend failures into semantic errors (`NotFound`,
//!   `AlreadyExists`) distinct from storage failures.
//!
//! # Invariants
//! - Every operation validates its inputs before touching state.
//! - Every operation returns owned copies; callers never hold references
//!   into stored state.
//! - Both backends return the same error variant for the same situation.

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use crate::model::todo_list::ToDoList;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by every store operation.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    ListNotFound(String),
    ListAlreadyExists(String),
    TaskNotFound { list: String, title: String },
    TaskIdNotFound { list: String, id: TaskId },
    TaskAlreadyExists { list: String, title: String },
    Db(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted row cannot be converted into a valid record.
    InvalidData(String),
    /// A previous holder of the store lock panicked.
    LockPoisoned,
}

/// Coarse classification used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    EmptyField,
    NotFound,
    AlreadyExists,
    StorageFailure,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Validation(_) => StoreErrorKind::EmptyField,
            Self::ListNotFound(_) | Self::TaskNotFound { .. } | Self::TaskIdNotFound { .. } => {
                StoreErrorKind::NotFound
            }
            Self::ListAlreadyExists(_) | Self::TaskAlreadyExists { .. } => {
                StoreErrorKind::AlreadyExists
            }
            Self::Db(_)
            | Self::UninitializedConnection { .. }
            | Self::InvalidData(_)
            | Self::LockPoisoned => StoreErrorKind::StorageFailure,
        }
    }

    pub(crate) fn list_not_found(list: &str) -> Self {
        Self::ListNotFound(list.to_string())
    }

    pub(crate) fn task_not_found(list: &str, title: &str) -> Self {
        Self::TaskNotFound {
            list: list.to_string(),
            title: title.to_string(),
        }
    }

    pub(crate) fn task_already_exists(list: &str, title: &str) -> Self {
        Self::TaskAlreadyExists {
            list: list.to_string(),
            title: title.to_string(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ListNotFound(list) => write!(f, "ToDo list not found: {list}"),
            Self::ListAlreadyExists(list) => write!(f, "ToDo list already present: {list}"),
            Self::TaskNotFound { list, title } => {
                write!(f, "task `{title}` not found in ToDo list {list}")
            }
            Self::TaskIdNotFound { list, id } => {
                write!(f, "task #{id} not found in ToDo list {list}")
            }
            Self::TaskAlreadyExists { list, title } => {
                write!(f, "task `{title}` already present in ToDo list {list}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "todo store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::LockPoisoned => write!(f, "todo store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract over lists and the tasks nested in them.
///
/// # Contract
/// - Blank keys fail with `Validation` before any state is read.
/// - Every returned value is an owned copy.
/// - A missing list reports `ListNotFound` from every task operation.
pub trait TodoStore: Send + Sync {
    /// Fails with `ListAlreadyExists` when the name is taken.
    fn create_list(&self, name: &str) -> StoreResult<ToDoList>;
    fn get_list(&self, name: &str) -> StoreResult<ToDoList>;
    /// Snapshot of every list ordered by name.
    fn get_all_lists(&self) -> StoreResult<Vec<ToDoList>>;
    /// Renames a list, carrying its tasks and id sequence along.
    ///
    /// # Errors
    /// - `ListNotFound` when `name` is absent.
    /// - `ListAlreadyExists` when `new_name` belongs to another list.
    fn update_list(&self, name: &str, new_name: &str) -> StoreResult<ToDoList>;
    /// Removes the list with all of its tasks and returns it.
    fn delete_list(&self, name: &str) -> StoreResult<ToDoList>;

    /// Appends a task with the list's next id.
    ///
    /// # Errors
    /// - `TaskAlreadyExists` when the title is taken in that list.
    fn add_task(&self, list: &str, title: &str) -> StoreResult<Task>;
    /// Fails with `TaskNotFound` when no task has that title.
    fn get_task(&self, list: &str, title: &str) -> StoreResult<Task>;
    /// Fails with `TaskIdNotFound` when no task has that id.
    fn get_task_by_id(&self, list: &str, id: TaskId) -> StoreResult<Task>;
    /// Overwrites title and done flag. A blank `new_title` keeps the current
    /// title.
    ///
    /// # Errors
    /// - `TaskNotFound` when `title` is absent.
    /// - `TaskAlreadyExists` when `new_title` belongs to another task.
    fn update_task(&self, list: &str, title: &str, new_title: &str, done: bool)
        -> StoreResult<Task>;
    /// Removes the task and returns it. Its id is never handed out again.
    fn remove_task(&self, list: &str, title: &str) -> StoreResult<Task>;
}

impl<S: TodoStore + ?Sized> TodoStore for Box<S> {
    fn create_list(&self, name: &str) -> StoreResult<ToDoList> {
        (**self).create_list(name)
    }

    fn get_list(&self, name: &str) -> StoreResult<ToDoList> {
        (**self).get_list(name)
    }

    fn get_all_lists(&self) -> StoreResult<Vec<ToDoList>> {
        (**self).get_all_lists()
    }

    fn update_list(&self, name: &str, new_name: &str) -> StoreResult<ToDoList> {
        (**self).update_list(name, new_name)
    }

    fn delete_list(&self, name: &str) -> StoreResult<ToDoList> {
        (**self).delete_list(name)
    }

    fn add_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        (**self).add_task(list, title)
    }

    fn get_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        (**self).get_task(list, title)
    }

    fn get_task_by_id(&self, list: &str, id: TaskId) -> StoreResult<Task> {
        (**self).get_task_by_id(list, id)
    }

    fn update_task(
        &self,
        list: &str,
        title: &str,
        new_title: &str,
        done: bool,
    ) -> StoreResult<Task> {
        (**self).update_task(list, title, new_title, done)
    }

    fn remove_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        (**self).remove_task(list, title)
    }
}

/// Field labels used in validation errors.
pub(crate) mod fields {
    pub const LIST_NAME: &str = "ToDo list name";
    pub const NEW_LIST_NAME: &str = "new ToDo list name";
    pub const TASK_TITLE: &str = "task title";
}

/// Resolves the effective title for an update.
pub(crate) fn effective_title<'a>(title: &'a str, new_title: &'a str) -> &'a str {
    if crate::model::is_blank(new_title) {
        title
    } else {
        new_title
    }
}

#[cfg(test)]
mod tests {
    use super::{effective_title, StoreError, StoreErrorKind};
    use crate::model::ValidationError;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(
            StoreError::from(ValidationError::EmptyField("x")).kind(),
            StoreErrorKind::EmptyField
        );
        assert_eq!(
            StoreError::task_not_found("l", "t").kind(),
            StoreErrorKind::NotFound
        );
        assert_eq!(
            StoreError::ListAlreadyExists("l".into()).kind(),
            StoreErrorKind::AlreadyExists
        );
        assert_eq!(
            StoreError::LockPoisoned.kind(),
            StoreErrorKind::StorageFailure
        );
    }

    #[test]
    fn blank_new_title_keeps_current_one() {
        assert_eq!(effective_title("milk", ""), "milk");
        assert_eq!(effective_title("milk", "  "), "milk");
        assert_eq!(effective_title("milk", "oat milk"), "oat milk");
    }
}
