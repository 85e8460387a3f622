//! SQLite-backed `TodoStore`.
//!
//! # Responsibility
//! - Persist lists and tasks in the `todolists` / `tasks` tables.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - One connection per store, guarded by a mutex held for each operation.
//! - Multi-statement mutations run in a single transaction.
//! - Tasks are read back in id order, which is insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{schema_version, supported_version};
use crate::db::{open_db, open_db_in_memory};
use crate::model::require_field;
use crate::model::task::{Task, TaskId};
use crate::model::todo_list::ToDoList;
use crate::store::{effective_title, fields, StoreError, StoreResult, TodoStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const TASK_SELECT_SQL: &str = "SELECT todolist_name, id, title, done FROM tasks";

/// SQL-backed store over one bootstrapped SQLite connection.
pub struct SqliteTodoStore {
    conn: Mutex<Connection>,
}

impl SqliteTodoStore {
    /// Wraps a connection whose schema is already at the latest version.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let actual_version = schema_version(&conn)?;
        let expected_version = supported_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (or creates) a database file and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl TodoStore for SqliteTodoStore {
    fn create_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if last_task_id(&tx, name)?.is_some() {
            return Err(StoreError::ListAlreadyExists(name.to_string()));
        }
        tx.execute("INSERT INTO todolists (name) VALUES (?1);", [name])?;
        tx.commit()?;

        Ok(ToDoList::new(name))
    }

    fn get_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let conn = self.lock()?;
        load_list(&conn, name)?.ok_or_else(|| StoreError::list_not_found(name))
    }

    fn get_all_lists(&self) -> StoreResult<Vec<ToDoList>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name, last_task_id FROM todolists ORDER BY name ASC;")?;
        let heads = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, TaskId>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut lists = Vec::with_capacity(heads.len());
        for (name, last_id) in heads {
            let tasks = load_tasks(&conn, &name)?;
            lists.push(ToDoList::from_parts(name, tasks, last_id));
        }
        Ok(lists)
    }

    fn update_list(&self, name: &str, new_name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;
        require_field(new_name, fields::NEW_LIST_NAME)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if last_task_id(&tx, name)?.is_none() {
            return Err(StoreError::list_not_found(name));
        }
        if name != new_name {
            if last_task_id(&tx, new_name)?.is_some() {
                return Err(StoreError::ListAlreadyExists(new_name.to_string()));
            }
            // Task rows follow through ON UPDATE CASCADE.
            tx.execute(
                "UPDATE todolists SET name = ?1 WHERE name = ?2;",
                params![new_name, name],
            )?;
        }
        let list = load_list(&tx, new_name)?.ok_or_else(|| StoreError::list_not_found(new_name))?;
        tx.commit()?;

        Ok(list)
    }

    fn delete_list(&self, name: &str) -> StoreResult<ToDoList> {
        require_field(name, fields::LIST_NAME)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let list = load_list(&tx, name)?.ok_or_else(|| StoreError::list_not_found(name))?;
        tx.execute("DELETE FROM todolists WHERE name = ?1;", [name])?;
        tx.commit()?;

        Ok(list)
    }

    fn add_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let last_id = last_task_id(&tx, list)?.ok_or_else(|| StoreError::list_not_found(list))?;
        if find_task(&tx, list, title)?.is_some() {
            return Err(StoreError::task_already_exists(list, title));
        }

        let task = Task::new(list, last_id + 1, title);
        tx.execute(
            "INSERT INTO tasks (todolist_name, id, title, done) VALUES (?1, ?2, ?3, ?4);",
            params![task.list_name, task.id, task.title, bool_to_int(task.done)],
        )?;
        tx.execute(
            "UPDATE todolists SET last_task_id = ?1 WHERE name = ?2;",
            params![task.id, list],
        )?;
        tx.commit()?;

        Ok(task)
    }

    fn get_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let conn = self.lock()?;
        ensure_list(&conn, list)?;
        find_task(&conn, list, title)?.ok_or_else(|| StoreError::task_not_found(list, title))
    }

    fn get_task_by_id(&self, list: &str, id: TaskId) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;

        let conn = self.lock()?;
        ensure_list(&conn, list)?;
        let mut stmt = conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE todolist_name = ?1 AND id = ?2;"
        ))?;
        let mut rows = stmt.query(params![list, id])?;
        if let Some(row) = rows.next()? {
            return parse_task_row(row);
        }

        Err(StoreError::TaskIdNotFound {
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

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        ensure_list(&tx, list)?;
        let mut task =
            find_task(&tx, list, title)?.ok_or_else(|| StoreError::task_not_found(list, title))?;
        if new_title != title && find_task(&tx, list, new_title)?.is_some() {
            return Err(StoreError::task_already_exists(list, new_title));
        }

        tx.execute(
            "UPDATE tasks SET title = ?1, done = ?2 WHERE todolist_name = ?3 AND id = ?4;",
            params![new_title, bool_to_int(done), list, task.id],
        )?;
        tx.commit()?;

        task.title = new_title.to_string();
        task.done = done;
        Ok(task)
    }

    fn remove_task(&self, list: &str, title: &str) -> StoreResult<Task> {
        require_field(list, fields::LIST_NAME)?;
        require_field(title, fields::TASK_TITLE)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        ensure_list(&tx, list)?;
        let task =
            find_task(&tx, list, title)?.ok_or_else(|| StoreError::task_not_found(list, title))?;
        tx.execute(
            "DELETE FROM tasks WHERE todolist_name = ?1 AND id = ?2;",
            params![list, task.id],
        )?;
        tx.commit()?;

        Ok(task)
    }
}

/// Returns the list's id sequence head, or `None` when the list is absent.
fn last_task_id(conn: &Connection, name: &str) -> StoreResult<Option<TaskId>> {
    let value = conn
        .query_row(
            "SELECT last_task_id FROM todolists WHERE name = ?1;",
            [name],
            |row| row.get::<_, TaskId>(0),
        )
        .optional()?;
    Ok(value)
}

fn ensure_list(conn: &Connection, name: &str) -> StoreResult<()> {
    match last_task_id(conn, name)? {
        Some(_) => Ok(()),
        None => Err(StoreError::list_not_found(name)),
    }
}

fn load_list(conn: &Connection, name: &str) -> StoreResult<Option<ToDoList>> {
    let Some(last_id) = last_task_id(conn, name)? else {
        return Ok(None);
    };
    let tasks = load_tasks(conn, name)?;
    Ok(Some(ToDoList::from_parts(name, tasks, last_id)))
}

fn load_tasks(conn: &Connection, list: &str) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "{TASK_SELECT_SQL} WHERE todolist_name = ?1 ORDER BY id ASC;"
    ))?;
    let mut rows = stmt.query([list])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn find_task(conn: &Connection, list: &str, title: &str) -> StoreResult<Option<Task>> {
    let mut stmt = conn.prepare(&format!(
        "{TASK_SELECT_SQL} WHERE todolist_name = ?1 AND title = ?2;"
    ))?;
    let mut rows = stmt.query(params![list, title])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_task_row(row)?));
    }

    Ok(None)
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid done value `{other}` in tasks.done"
            )));
        }
    };

    Ok(Task {
        list_name: row.get("todolist_name")?,
        id: row.get("id")?,
        title: row.get("title")?,
        done,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
