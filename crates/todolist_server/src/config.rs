use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_WORKER_COUNT: usize = 4;
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Process-local map; state is lost on exit.
    Memory,
    /// SQLite database at `--db-path`.
    Sqlite,
}

/// REST API for managing ToDo lists and their tasks.
#[derive(Parser, Debug, Clone)]
#[command(name = "todolist-server", version)]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "TODOLIST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "TODOLIST_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "TODOLIST_BACKEND", value_enum, default_value_t = Backend::Memory)]
    pub backend: Backend,

    /// SQLite file; `:memory:` opens a private in-memory database.
    #[arg(long, env = "TODOLIST_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// trace|debug|info|warn|error. Defaults to debug in debug builds.
    #[arg(long, env = "TODOLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset.
    #[arg(long, env = "TODOLIST_LOG_DIR")]
    pub log_dir: Option<String>,

    #[arg(long, env = "TODOLIST_WORKERS", default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
