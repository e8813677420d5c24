//! JSON sidecar files
//!
//! Each persisted novel gets `<download_dir>/<id>/<id>.json` holding the
//! full record, chapters included. The store row only carries metadata.

use crate::model::NovelRecord;
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// Writes per-novel JSON files under a root directory
#[derive(Debug, Clone)]
pub struct SidecarWriter {
    root: PathBuf,
}

impl SidecarWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the sidecar for novel `id`
    pub fn novel_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Full path of the sidecar for novel `id`
    pub fn sidecar_path(&self, id: &str) -> PathBuf {
        self.novel_dir(id).join(format!("{}.json", id))
    }

    /// Serializes `record` to its sidecar, replacing any previous file
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written file
    /// * `Err(HarvestError)` - Directory creation, serialization or write failed
    pub async fn write(&self, record: &NovelRecord) -> Result<PathBuf, HarvestError> {
        let dir = self.novel_dir(&record.id);
        if tokio::fs::try_exists(&dir).await? {
            tracing::debug!("Folder already exists: {}", dir.display());
        } else {
            tokio::fs::create_dir_all(&dir).await?;
            tracing::debug!("Folder created: {}", dir.display());
        }

        let path = self.sidecar_path(&record.id);
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;

        tracing::info!("Saved {} to {}", record.title, path.display());
        Ok(path)
    }
}
