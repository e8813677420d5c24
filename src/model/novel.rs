//! Assembled novel records

use crate::model::fingerprint;
use serde::{Deserialize, Serialize};

/// A single chapter, in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub name: String,
    pub body: String,
}

/// A fully fetched novel
///
/// Created once per successful fetch and never mutated afterwards. The full
/// record, chapters included, is what lands in the JSON sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub intro: String,
    pub url: String,
    pub chapters: Vec<ChapterRecord>,
}

impl NovelRecord {
    /// Assembles a record, deriving `id` from `title`
    ///
    /// Returns `None` for a blank title: every blank title would share one
    /// fingerprint and collide in the store.
    pub fn assemble(
        title: &str,
        author: String,
        intro: String,
        url: &str,
        chapters: Vec<ChapterRecord>,
    ) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            id: fingerprint(title),
            title: title.to_string(),
            author,
            intro,
            url: url.to_string(),
            chapters,
        })
    }

    /// The store-side view of this record, without chapter bodies
    pub fn document(&self) -> NovelDocument {
        NovelDocument {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            intro: self.intro.clone(),
            url: self.url.clone(),
            chapter_count: self.chapters.len(),
        }
    }
}

/// A novel as inserted into the store
///
/// Chapters live only in the sidecar file to keep store rows small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelDocument {
    pub id: String,
    pub title: String,
    pub author: String,
    pub intro: String,
    pub url: String,
    pub chapter_count: usize,
}
