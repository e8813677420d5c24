//! Discovery of candidate novels
//!
//! Walks the configured category listing pages in order and collects every
//! listed novel URL. A category whose listing cannot be fetched contributes
//! nothing but does not stop the walk. The surviving categories replace the
//! store's previous snapshot wholesale.
//!
//! Title search against the source site lives here too, since it is the
//! other way of turning a name into a novel URL.

use crate::config::{CategoryEntry, SEARCH_TITLE_PLACEHOLDER};
use crate::crawler::extractor::{extract_category_novel_links, extract_search_results, resolve_link};
use crate::crawler::transport::Transport;
use crate::model::{Category, NovelListing};
use crate::storage::NovelStore;
use crate::HarvestError;
use std::sync::Arc;
use url::Url;

/// A category whose listing could not be enumerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    pub title: String,
    pub url: String,
    pub reason: String,
}

/// Result of one discovery run
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Every listed novel URL, category order then page order
    pub candidates: Vec<String>,
    /// Categories that were enumerated and stored
    pub categories: Vec<Category>,
    /// Categories left out of this run
    pub failures: Vec<CategoryFailure>,
}

/// Enumerates category listing pages
pub struct DiscoveryEnumerator {
    transport: Arc<dyn Transport>,
}

impl DiscoveryEnumerator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Walks every category and replaces the stored snapshot
    ///
    /// # Returns
    ///
    /// * `Ok(DiscoveryReport)` - At least one category was enumerated
    /// * `Err(HarvestError::Discovery)` - Every category failed; the previous
    ///   snapshot is left untouched
    /// * `Err(HarvestError::StoreUnavailable)` - The snapshot could not be written
    pub async fn discover_all(
        &self,
        entries: &[CategoryEntry],
        store: &dyn NovelStore,
    ) -> Result<DiscoveryReport, HarvestError> {
        let mut report = DiscoveryReport::default();

        for entry in entries {
            match self.enumerate(entry).await {
                Ok(category) => {
                    tracing::info!(
                        "Category {} lists {} novels",
                        category.title,
                        category.novels.len()
                    );
                    report
                        .candidates
                        .extend(category.novel_urls().map(str::to_string));
                    report.categories.push(category);
                }
                Err(e) => {
                    tracing::error!("Category {} skipped: {}", entry.title, e);
                    report.failures.push(CategoryFailure {
                        title: entry.title.clone(),
                        url: entry.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if report.categories.is_empty() && !entries.is_empty() {
            return Err(HarvestError::Discovery(format!(
                "none of {} category listings could be fetched",
                entries.len()
            )));
        }

        store.replace_categories(&report.categories)?;
        tracing::info!(
            "Stored snapshot of {} categories, {} candidate novels",
            report.categories.len(),
            report.candidates.len()
        );

        Ok(report)
    }

    /// Fetches one listing page and extracts its novels
    pub async fn enumerate(&self, entry: &CategoryEntry) -> Result<Category, HarvestError> {
        let html = self.transport.fetch(&entry.url).await?;
        let base = Url::parse(&entry.url).ok();

        let novels = extract_category_novel_links(&html)
            .into_iter()
            .filter_map(|listing| absolutize(listing, base.as_ref()))
            .collect();

        Ok(Category {
            title: entry.title.clone(),
            url: entry.url.clone(),
            novels,
        })
    }
}

/// Looks a novel up by exact title on the source site's search page
///
/// Returns `Ok(None)` when no result carries exactly this title.
pub async fn search_novel(
    transport: &dyn Transport,
    search_url_template: &str,
    title: &str,
) -> Result<Option<String>, HarvestError> {
    let encoded: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
    let search_url = search_url_template.replace(SEARCH_TITLE_PLACEHOLDER, &encoded);

    let html = transport.fetch(&search_url).await?;
    let hits = extract_search_results(&html);
    if hits.is_empty() {
        tracing::error!("Found no novel.");
        return Ok(None);
    }

    let base = Url::parse(&search_url).ok();
    let found = hits.into_iter().find(|hit| hit.title == title).map(|hit| {
        tracing::info!("Found novel: {} author: {}", hit.title, hit.author);
        match &base {
            Some(base) => resolve_link(&hit.url, base).unwrap_or(hit.url),
            None => hit.url,
        }
    });

    if found.is_none() {
        tracing::warn!("No search result titled exactly \"{}\"", title);
    }
    Ok(found)
}

fn absolutize(listing: NovelListing, base: Option<&Url>) -> Option<NovelListing> {
    let url = match base {
        Some(base) => resolve_link(&listing.url, base)?,
        None => listing.url,
    };
    Some(NovelListing {
        url,
        title: listing.title,
    })
}
