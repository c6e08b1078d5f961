use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS stories (
            id          TEXT PRIMARY KEY,
            owner       TEXT NOT NULL,
            story       TEXT NOT NULL,
            share_id    TEXT UNIQUE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_stories_owner
            ON stories(owner, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
