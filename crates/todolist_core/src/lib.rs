//! Core domain logic for the ToDo list service.
//! This crate is the single source of truth for list and task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{
    default_log_level, init_logging, log_field, logging_status, LogTarget, LoggingError,
    LoggingStatus,
};
pub use model::task::{Task, TaskId};
pub use model::todo_list::ToDoList;
pub use model::ValidationError;
pub use service::todo_service::TodoService;
pub use store::memory_store::MemoryTodoStore;
pub use store::sqlite_store::SqliteTodoStore;
pub use store::{StoreError, StoreErrorKind, StoreResult, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
