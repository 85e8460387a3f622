//! HTTP server wiring.
//!
//! # Responsibility
//! - Open the storage backend chosen by [`ServerConfig`].
//! - Register every controller on one actix `App`.
//!
//! # Invariants
//! - All workers share a single store instance through `web::Data`.
//! - Trailing slashes are trimmed before routing.

use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use log::info;
use todolist_core::{MemoryTodoStore, SqliteTodoStore, TodoService, TodoStore};

use crate::config::{Backend, ServerConfig, IN_MEMORY_DB_PATH};
use crate::controllers::{list_controller, system_controller, task_controller};

pub struct AppState {
    pub service: TodoService<Box<dyn TodoStore>>,
}

impl AppState {
    pub fn new(store: Box<dyn TodoStore>) -> Self {
        Self {
            service: TodoService::new(store),
        }
    }
}

/// Registers every route. Callers wrap the app in [`NormalizePath::trim`].
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(list_controller::config)
        .configure(task_controller::config)
        .configure(system_controller::config);
}

pub fn open_store(config: &ServerConfig) -> anyhow::Result<Box<dyn TodoStore>> {
    match config.backend {
        Backend::Memory => Ok(Box::new(MemoryTodoStore::new())),
        Backend::Sqlite => {
            let Some(path) = config.db_path.as_ref() else {
                bail!("--db-path is required when --backend sqlite is selected");
            };
            let store = if path.as_os_str() == IN_MEMORY_DB_PATH {
                SqliteTodoStore::open_in_memory()
            } else {
                SqliteTodoStore::open(path)
            }
            .with_context(|| format!("failed to open sqlite store at {}", path.display()))?;
            Ok(Box::new(store))
        }
    }
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let state = web::Data::new(AppState::new(store));
    let bind_address = config.bind_address();

    info!(
        "event=server_start module=server status=ok bind={} backend={:?} workers={}",
        bind_address, config.backend, config.workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .configure(app_config)
    })
    .workers(config.workers.max(1))
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?
    .run()
    .await
    .context("http server terminated with an error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}
