//! Storage module for persisting harvested novels
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - The URL existence check used to skip already-stored novels
//! - Novel document insertion (chapters excluded)
//! - The category snapshot written by discovery
//!
//! Every worker opens its own connection through a [`StoreProvider`]; no
//! connection is shared across workers.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{SqliteProvider, SqliteStorage};
pub use traits::{InsertOutcome, NovelStore, StorageError, StorageResult, StoreProvider};
