pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

/// `DATABASE_URL` value that keeps the ticket store in memory for the life of the process.
pub const IN_MEMORY: &str = ":memory:";

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = if path == IN_MEMORY {
        Connection::open_in_memory().context("failed to open in-memory database")?
    } else {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open ticket database at {path}"))?;
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .context("failed to enable WAL journal")?;
        tracing::debug!(mode, "journal mode set");
        conn
    };

    conn.pragma_update(None, "foreign_keys", true)
        .context("failed to enable foreign keys")?;

    migrations::run_migrations(&conn)?;
    tracing::debug!(path, "ticket database ready");

    Ok(conn)
}
