//! Core use-case services.
//!
//! Keep the HTTP layer decoupled from the selected storage backend.

pub mod todo_service;
