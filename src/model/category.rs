use serde::{Deserialize, Serialize};

/// A novel reference found on a category listing page, not yet fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelListing {
    pub url: String,
    pub title: String,
}

/// One category listing page and the novels it lists, in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub url: String,
    pub novels: Vec<NovelListing>,
}

impl Category {
    /// URLs of every listed novel, in page order
    pub fn novel_urls(&self) -> impl Iterator<Item = &str> {
        self.novels.iter().map(|n| n.url.as_str())
    }
}
