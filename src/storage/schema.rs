//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Novel-Harvest database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Stored novels, one row per source URL (chapters live in the sidecar)
CREATE TABLE IF NOT EXISTS novels (
    row_id INTEGER PRIMARY KEY AUTOINCREMENT,
    fingerprint TEXT NOT NULL,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    intro TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    chapter_count INTEGER NOT NULL,
    fetched_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_novels_fingerprint ON novels(fingerprint);

-- Latest discovery snapshot, replaced wholesale on every discovery run
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    novels TEXT NOT NULL,
    discovered_at TEXT NOT NULL
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
