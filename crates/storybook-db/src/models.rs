/// Database row types — these map directly to SQLite rows.
/// Distinct from storybook-types API models to keep the DB layer independent.

pub struct StoryRow {
    pub id: String,
    pub owner: String,
    pub story: String,
    pub share_id: Option<String>,
    pub created_at: String,
}
