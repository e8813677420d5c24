use crate::model::NovelRecord;
use std::fmt;

/// Why a novel was not written to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The store already held the URL before any fetch
    AlreadyStored,
    /// Fetched and written to disk, but another worker stored the URL first
    DuplicateInsert,
}

/// Per-URL result of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NovelOutcome {
    Persisted(NovelRecord),
    Skipped(SkipReason),
    Failed(String),
}

impl NovelOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStored => write!(f, "already stored"),
            Self::DuplicateInsert => write!(f, "stored concurrently by another worker"),
        }
    }
}

impl fmt::Display for NovelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(record) => write!(
                f,
                "persisted \"{}\" ({} chapters)",
                record.title,
                record.chapters.len()
            ),
            Self::Skipped(reason) => write!(f, "skipped: {}", reason),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
