//! ToDo list use-case service.
//!
//! # Responsibility
//! - Provide the list and task entry points used by the HTTP layer.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - Service APIs never bypass store validation.
//! - Service layer remains storage-agnostic.
//! - Client-supplied names and titles reach the log only through
//!   [`log_field`].

use crate::logging::log_field;
use crate::model::task::{Task, TaskId};
use crate::model::todo_list::ToDoList;
use crate::store::{StoreErrorKind, StoreResult, TodoStore};
use log::{error, info, warn};

/// Use-case facade over a `TodoStore` backend.
pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an empty list.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank.
    /// - `ListAlreadyExists` when the name is taken.
    pub fn create_list(&self, name: &str) -> StoreResult<ToDoList> {
        let result = self.store.create_list(name);
        observe("list_create", &describe(&[("list", name)]), result)
    }

    /// Returns a copy of one list with its tasks.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank.
    /// - `ListNotFound` when no list has that name.
    pub fn get_list(&self, name: &str) -> StoreResult<ToDoList> {
        let result = self.store.get_list(name);
        observe("list_get", &describe(&[("list", name)]), result)
    }

    /// Returns copies of every list, ordered by name.
    pub fn get_all_lists(&self) -> StoreResult<Vec<ToDoList>> {
        let result = self.store.get_all_lists();
        let subject = match &result {
            Ok(lists) => format!("count={}", lists.len()),
            Err(_) => String::new(),
        };
        observe("list_get_all", &subject, result)
    }

    /// Renames a list; its tasks follow.
    ///
    /// # Errors
    /// - `Validation` when either name is blank.
    /// - `ListNotFound` when `name` is absent.
    /// - `ListAlreadyExists` when `new_name` belongs to another list.
    pub fn update_list(&self, name: &str, new_name: &str) -> StoreResult<ToDoList> {
        let result = self.store.update_list(name, new_name);
        observe(
            "list_update",
            &describe(&[("list", name), ("new_name", new_name)]),
            result,
        )
    }

    /// Removes a list with all of its tasks and returns what was removed.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank.
    /// - `ListNotFound` when no list has that name.
    pub fn delete_list(&self, name: &str) -> StoreResult<ToDoList> {
        let result = self.store.delete_list(name);
        observe("list_delete", &describe(&[("list", name)]), result)
    }

    /// Appends a not-yet-done task with the list's next id.
    ///
    /// # Errors
    /// - `Validation` when `list` or `title` is blank.
    /// - `ListNotFound` when the list is absent.
    /// - `TaskAlreadyExists` when the title is taken in that list.
    pub fn add_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        let result = self.store.add_task(list, title);
        observe(
            "task_add",
            &describe(&[("list", list), ("title", title)]),
            result,
        )
    }

    /// Returns a copy of the task titled `title`.
    ///
    /// # Errors
    /// - `Validation` when `list` or `title` is blank.
    /// - `ListNotFound` or `TaskNotFound` when either is absent.
    pub fn get_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        let result = self.store.get_task(list, title);
        observe(
            "task_get",
            &describe(&[("list", list), ("title", title)]),
            result,
        )
    }

    /// Returns a copy of the task with id `id`.
    ///
    /// # Errors
    /// - `Validation` when `list` is blank.
    /// - `ListNotFound` or `TaskIdNotFound` when either is absent.
    pub fn get_task_by_id(&self, list: &str, id: TaskId) -> StoreResult<Task> {
        let result = self.store.get_task_by_id(list, id);
        let subject = format!("{} id={id}", describe(&[("list", list)]));
        observe("task_get_by_id", &subject, result)
    }

    /// Overwrites the title and done flag of the task titled `title`.
    /// A blank `new_title` keeps the current title.
    ///
    /// # Errors
    /// - `Validation` when `list` or `title` is blank.
    /// - `ListNotFound` or `TaskNotFound` when either is absent.
    /// - `TaskAlreadyExists` when `new_title` belongs to another task.
    pub fn update_task(
        &self,
        list: &str,
        title: &str,
        new_title: &str,
        done: bool,
    ) -> StoreResult<Task> {
        let result = self.store.update_task(list, title, new_title, done);
        let subject = format!(
            "{} done={done}",
            describe(&[("list", list), ("title", title), ("new_title", new_title)])
        );
        observe("task_update", &subject, result)
    }

    /// Removes the task titled `title` and returns it. Its id is not reused.
    ///
    /// # Errors
    /// - `Validation` when `list` or `title` is blank.
    /// - `ListNotFound` or `TaskNotFound` when either is absent.
    pub fn remove_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        let result = self.store.remove_task(list, title);
        observe(
            "task_remove",
            &describe(&[("list", list), ("title", title)]),
            result,
        )
    }
}

/// Joins `key=value` pairs with every value passed through [`log_field`].
fn describe(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={}", log_field(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Logs the outcome of one store call and hands the result back unchanged.
///
/// Caller mistakes (empty field, unknown or duplicate key) log at `warn`;
/// storage failures log at `error`.
fn observe<T>(event: &str, subject: &str, result: StoreResult<T>) -> StoreResult<T> {
    match &result {
        Ok(_) => info!("event={event} module=service status=ok {subject}"),
        Err(err) if err.kind() == StoreErrorKind::StorageFailure => error!(
            "event={event} module=service status=error {subject} error={}",
            log_field(&err.to_string())
        ),
        Err(err) => warn!(
            "event={event} module=service status=rejected {subject} error={}",
            log_field(&err.to_string())
        ),
    }
    result
}
