//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::model::{Category, NovelDocument};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result of inserting a novel document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written with this id
    Inserted(i64),
    /// A row with the same URL already exists; nothing was written
    Duplicate,
}

/// Trait for storage backend implementations
///
/// Methods take `&self` so a store can be borrowed across await points by
/// the task that owns it. A store is owned by a single worker.
pub trait NovelStore: Send + Sync {
    // ===== Novels =====

    /// Checks whether a novel with this source URL is already stored
    fn exists_by_url(&self, url: &str) -> StorageResult<bool>;

    /// Inserts a novel document, refusing a second row for the same URL
    fn insert_novel(&self, doc: &NovelDocument) -> StorageResult<InsertOutcome>;

    /// Gets total stored novel count
    fn count_novels(&self) -> StorageResult<u64>;

    // ===== Category Snapshot =====

    /// Drops the previous category snapshot and stores `categories` in its place
    fn replace_categories(&self, categories: &[Category]) -> StorageResult<()>;

    /// Loads the current category snapshot in insertion order
    fn load_categories(&self) -> StorageResult<Vec<Category>>;
}

/// Opens an independent store handle for one unit of work
///
/// The returned handle is dropped when the unit finishes, which releases
/// its connection on every exit path.
pub trait StoreProvider: Send + Sync {
    fn open(&self) -> StorageResult<Box<dyn NovelStore>>;
}
