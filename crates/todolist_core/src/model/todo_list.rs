//! ToDo list record.
//!
//! # Responsibility
//! - Hold the ordered tasks of one list together with the id sequence.
//! - Keep the cached task count in step with the task vector.
//!
//! # Invariants
//! - Tasks keep insertion order.
//! - `last_task_id` only grows; removed ids are never handed out again.
//! - Every task's `list_name` equals the list `name`.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of tasks.
///
/// Deserialized input goes through [`ToDoList::from_parts`]; an incoming
/// `TaskNumber` is ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListRecord")]
pub struct ToDoList {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "TaskNumber")]
    task_number: usize,
    #[serde(rename = "Tasks", default)]
    tasks: Vec<Task>,
    #[serde(skip)]
    last_task_id: TaskId,
}

/// Wire shape accepted when decoding a list.
#[derive(Deserialize)]
struct ListRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Tasks", default)]
    tasks: Vec<Task>,
}

impl From<ListRecord> for ToDoList {
    fn from(record: ListRecord) -> Self {
        Self::from_parts(record.name, record.tasks, 0)
    }
}

impl ToDoList {
    /// Creates an empty list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task_number: 0,
            tasks: Vec::new(),
            last_task_id: 0,
        }
    }

    /// Rebuilds a list from persisted or decoded parts.
    ///
    /// # Contract
    /// - `task_number` is recomputed from `tasks`.
    /// - `last_task_id` is raised to the highest task id when the given value
    ///   lags behind, so the sequence never collides with an existing task.
    /// - Every task's `list_name` is set to `name`.
    pub fn from_parts(name: impl Into<String>, mut tasks: Vec<Task>, last_task_id: TaskId) -> Self {
        let name = name.into();
        for task in &mut tasks {
            if task.list_name != name {
                task.list_name = name.clone();
            }
        }
        let highest = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        Self {
            name,
            task_number: tasks.len(),
            tasks,
            last_task_id: last_task_id.max(highest),
        }
    }

    /// Unique list key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached task count; always equals `tasks().len()`.
    pub fn task_number(&self) -> usize {
        self.task_number
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Highest id ever handed out in this list, `0` when none was.
    pub fn last_task_id(&self) -> TaskId {
        self.last_task_id
    }

    /// Looks up a task by its exact title.
    pub fn find_task(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.title == title)
    }

    /// Looks up a task by its id.
    pub fn find_task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a new task with the next id and returns a copy of it.
    ///
    /// Callers are expected to have rejected duplicate titles already.
    pub(crate) fn push_task(&mut self, title: &str) -> Task {
        self.last_task_id += 1;
        let task = Task::new(self.name.clone(), self.last_task_id, title);
        self.tasks.push(task.clone());
        self.task_number = self.tasks.len();
        task
    }

    /// Overwrites title and status of the task currently titled `title`.
    pub(crate) fn update_task(&mut self, title: &str, new_title: &str, done: bool) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.title == title)?;
        task.title = new_title.to_string();
        task.done = done;
        Some(task.clone())
    }

    pub(crate) fn remove_task(&mut self, title: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.title == title)?;
        let removed = self.tasks.remove(index);
        self.task_number = self.tasks.len();
        Some(removed)
    }

    /// Re-keys the list and every task back-reference.
    pub(crate) fn rename(&mut self, new_name: &str) {
        self.name = new_name.to_string();
        for task in &mut self.tasks {
            task.list_name = new_name.to_string();
        }
    }
}
