//! In-memory `TodoStore` backend.
//!
//! # Invariants
//! - One mutex guards the whole map for the duration of each operation.
//! - Map keys always equal the stored list's `name`.

use crate::model::require_field;
use crate::model::task::{Task, TaskId};
use crate::model::todo_list::ToDoList;
use crate::store::{effective_title, fields, StoreError, StoreResult, TodoStore};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

type ListMap = BTreeMap<String, ToDoList>;

/// Process-local store; state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    lists: Mutex<ListMap>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ListMap>> {
        self.lists.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn list_mut<'a>(lists: &'a mut ListMap, name: &str) -> StoreResult<&'a mut ToDoList> {
    lists
        .get_mut(name)
        .ok_or_else(|| StoreError::list_not_found(name))
}

fn list_ref<'a>(lists: &'a ListMap, name: &str) -> StoreResult<&'a ToDoList> {
    lists
        .get(name)
        .ok_or_else(|| StoreError::list_not_found(name))
}

impl TodoStore for MemoryTodoStore {
    fn create_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let mut lists = self.lock()?;
        if lists.contains_key(name) {
            return Err(StoreError::ListAlreadyExists(name.to_string()));
        }
        let list = ToDoList::new(name);
        lists.insert(name.to_string(), list.clone());
        Ok(list)
    }

    fn get_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let lists = self.lock()?;
        list_ref(&lists, name).cloned()
    }

    fn get_all_lists(&self) -> StoreResult<Vec<ToDoList>> {
        let lists = self.lock()?;
        Ok(lists.values().cloned().collect())
    }

    fn update_list(&self, name: &str, new_name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;
        require_field(new_name, fields::NEW_LIST_NAME)?;

        let mut lists = self.lock()?;
        if !lists.contains_key(name) {
            return Err(StoreError::list_not_found(name));
        }
        if name == new_name {
            return list_ref(&lists, name).cloned();
        }
        if lists.contains_key(new_name) {
            return Err(StoreError::ListAlreadyExists(new_name.to_string()));
        }

        let mut list = lists
            .remove(name)
            .ok_or_else(|| StoreError::list_not_found(name))?;
        list.rename(new_name);
        lists.insert(new_name.to_string(), list.clone());
        Ok(list)
    }

    fn delete_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let mut lists = self.lock()?;
        lists
            .remove(name)
            .ok_or_else(|| StoreError::list_not_found(name))
    }

    fn add_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let mut lists = self.lock()?;
        let todo_list = list_mut(&mut lists, list)?;
        if todo_list.find_task(title).is_some() {
            return Err(StoreError::task_already_exists(list, title));
        }
        Ok(todo_list.push_task(title))
    }

    fn get_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let lists = self.lock()?;
        list_ref(&lists, list)?
            .find_task(title)
            .cloned()
            .ok_or_else(|| StoreError::task_not_found(list, title))
    }

    fn get_task_by_id(&self, list: &str, id: TaskId) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;

        let lists = self.lock()?;
        list_ref(&lists, list)?
            .find_task_by_id(id)
            .cloned()
            .ok_or_else(|| StoreError::TaskIdNotFound {
                list: list.to_string(),
                id,
            })
    }

    fn update_task(
        &self,
        list: &str,
        title: &str,
        new_title: &str,
        done: bool,
    ) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;
        let new_title = effective_title(title, new_title);

        let mut lists = self.lock()?;
        let todo_list = list_mut(&mut lists, list)?;
        if todo_list.find_task(title).is_none() {
            return Err(StoreError::task_not_found(list, title));
        }
        if new_title != title && todo_list.find_task(new_title).is_some() {
            return Err(StoreError::task_already_exists(list, new_title));
        }
        todo_list
            .update_task(title, new_title, done)
            .ok_or_else(|| StoreError::task_not_found(list, title))
    }

    fn remove_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let mut lists = self.lock()?;
        list_mut(&mut lists, list)?
            .remove_task(title)
            .ok_or_else(|| StoreError::task_not_found(list, title))
    }
}
