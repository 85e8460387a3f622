use super::migrations::migrate;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens or creates the database file at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(prepare);
    log_open(&path.display().to_string(), started_at, &result);
    result
}

/// Opens a private in-memory database and migrates it.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(prepare);
    log_open(":memory:", started_at, &result);
    result
}

/// Foreign keys must be on for list renames and deletes to cascade to tasks.
fn prepare(mut conn: Connection) -> DbResult<Connection> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrate(&mut conn)?;
    Ok(conn)
}

fn log_open(target: &str, started_at: Instant, result: &DbResult<Connection>) {
    let elapsed_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={}",
            target, elapsed_ms
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={} error={}",
            target, elapsed_ms, err
        ),
    }
}
