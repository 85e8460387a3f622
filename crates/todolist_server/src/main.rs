use clap::Parser;
use todolist_core::{default_log_level, init_logging};
use todolist_server::{server, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, config.log_dir.as_deref())?;

    server::run(config).await
}
