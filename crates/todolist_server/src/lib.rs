pub mod config;
pub mod controllers;
pub mod error;
pub mod server;

pub use config::{Backend, ServerConfig};
pub use error::ApiError;
pub use server::{app_config, open_store, run, AppState};
