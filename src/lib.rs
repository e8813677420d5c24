//! Novel-Harvest: discovers, fetches and persists serialized novels
//!
//! This crate walks category listing pages of a novel site, resolves each
//! novel's detail page and chapter index, fetches every chapter and stores
//! the assembled record as a JSON sidecar plus a row in a SQLite store.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod storage;

use thiserror::Error;

pub use crawler::TransportError;
pub use storage::StorageError;

/// Main error type for Novel-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Could not extract {field} from {url}")]
    Extraction { url: String, field: &'static str },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Discovery failed: {0}")]
    Discovery(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Novel-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{fingerprint, Category, ChapterRecord, NovelListing, NovelRecord};
