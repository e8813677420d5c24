//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the NovelStore trait.

use crate::model::{Category, NovelDocument, NovelListing};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{
    InsertOutcome, NovelStore, StorageError, StorageResult, StoreProvider,
};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// How long a writer waits on a lock held by another worker's connection
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens or creates the database at `path` and applies the schema
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Database("connection lock poisoned".to_string()))
    }
}

impl NovelStore for SqliteStorage {
    // ===== Novels =====

    fn exists_by_url(&self, url: &str) -> StorageResult<bool> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM novels WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn insert_novel(&self, doc: &NovelDocument) -> StorageResult<InsertOutcome> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let changed = conn.execute(
            "INSERT INTO novels (fingerprint, title, author, intro, url, chapter_count, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(url) DO NOTHING",
            params![
                doc.id,
                doc.title,
                doc.author,
                doc.intro,
                doc.url,
                doc.chapter_count as i64,
                now
            ],
        )?;

        if changed == 0 {
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Inserted(conn.last_insert_rowid()))
        }
    }

    fn count_novels(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM novels", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Category Snapshot =====

    fn replace_categories(&self, categories: &[Category]) -> StorageResult<()> {
        let mut conn = self.conn()?;
        let now = Utc::now().to_rfc3339();

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM categories", [])?;
        for category in categories {
            let novels = serde_json::to_string(&category.novels)?;
            tx.execute(
                "INSERT INTO categories (title, url, novels, discovered_at) VALUES (?1, ?2, ?3, ?4)",
                params![category.title, category.url, novels, now],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn load_categories(&self) -> StorageResult<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT title, url, novels FROM categories ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(title, url, novels)| {
                let novels: Vec<NovelListing> = serde_json::from_str(&novels)?;
                Ok(Category { title, url, novels })
            })
            .collect()
    }
}

/// Opens a fresh [`SqliteStorage`] connection per call
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
}

impl SqliteProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreProvider for SqliteProvider {
    fn open(&self) -> StorageResult<Box<dyn NovelStore>> {
        Ok(Box::new(SqliteStorage::new(&self.path)?))
    }
}
