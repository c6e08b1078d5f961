use crate::Database;
use crate::models::StoryRow;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

impl Database {
    // -- Stories --

    /// Insert a story and return the persisted row, including the
    /// database-assigned created_at.
    pub fn insert_story(
        &self,
        id: &str,
        owner: &str,
        story: &str,
        share_id: Option<&str>,
    ) -> Result<StoryRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO stories (id, owner, story, share_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, owner, story, share_id],
            )?;

            query_story_by_id(conn, id)?.ok_or_else(|| anyhow!("Story vanished after insert: {}", id))
        })
    }

    /// All stories for an owner, newest first. SQLite timestamps have
    /// second granularity, so ties fall back to insertion order.
    pub fn list_by_owner(&self, owner: &str) -> Result<Vec<StoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner, story, share_id, created_at
                 FROM stories
                 WHERE owner = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;

            let rows = stmt
                .query_map([owner], map_story_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Delete every row matching both fields exactly. Zero matches is a
    /// success; existence is deliberately not checked first.
    pub fn delete_exact(&self, owner: &str, story: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM stories WHERE owner = ?1 AND story = ?2",
                rusqlite::params![owner, story],
            )?;
            Ok(removed)
        })
    }

    pub fn delete_all_for_owner(&self, owner: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM stories WHERE owner = ?1", [owner])?;
            Ok(removed)
        })
    }

    // -- Sharing --

    pub fn get_by_share_id(&self, share_id: &str) -> Result<Option<StoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner, story, share_id, created_at
                 FROM stories
                 WHERE share_id = ?1",
            )?;

            let row = stmt.query_row([share_id], map_story_row).optional()?;
            Ok(row)
        })
    }

    /// Assign a fresh share id to every legacy row that has none.
    /// Idempotent; returns the number of rows updated.
    pub fn backfill_share_ids(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM stories WHERE share_id IS NULL")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            for id in &ids {
                conn.execute(
                    "UPDATE stories SET share_id = ?1 WHERE id = ?2",
                    rusqlite::params![crate::share::new_share_id(), id],
                )?;
            }

            Ok(ids.len())
        })
    }
}

fn query_story_by_id(conn: &Connection, id: &str) -> Result<Option<StoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, story, share_id, created_at FROM stories WHERE id = ?1",
    )?;

    let row = stmt.query_row([id], map_story_row).optional()?;
    Ok(row)
}

fn map_story_row(row: &rusqlite::Row<'_>) -> std::result::Result<StoryRow, rusqlite::Error> {
    Ok(StoryRow {
        id: row.get(0)?,
        owner: row.get(1)?,
        story: row.get(2)?,
        share_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Maps `QueryReturnedNoRows` to `None` so single-row lookups can
/// return `Option` instead of an error.
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
