//! Fetching a single novel
//!
//! One novel is: detail page → chapter index (the same page) → every marked
//! chapter in order → assembled [`NovelRecord`]. The detail page is fatal
//! for the novel when it cannot be fetched or has no title; a single chapter
//! that fails is logged and left out.

use crate::crawler::extractor::{
    extract_author, extract_chapter_body, extract_chapter_links, extract_intro, extract_title,
    resolve_link, ChapterLink,
};
use crate::crawler::gate::DedupeGate;
use crate::crawler::pacing::FixedDelay;
use crate::crawler::transport::Transport;
use crate::model::{ChapterRecord, NovelRecord};
use crate::HarvestError;
use std::sync::Arc;
use url::Url;

/// Result of asking for one novel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The novel was fetched and assembled
    Fetched(NovelRecord),
    /// The store already holds this URL; nothing was fetched
    Skipped,
}

/// Orchestrates the fetch of one novel
#[derive(Clone)]
pub struct NovelFetcher {
    transport: Arc<dyn Transport>,
    chapter_pacing: FixedDelay,
}

impl NovelFetcher {
    /// Creates a fetcher that waits `chapter_pacing` before each chapter request
    pub fn new(transport: Arc<dyn Transport>, chapter_pacing: FixedDelay) -> Self {
        Self {
            transport,
            chapter_pacing,
        }
    }

    /// Fetches a novel unless the gate reports it as already stored
    ///
    /// # Returns
    ///
    /// * `Ok(FetchOutcome::Skipped)` - URL already stored, no request made
    /// * `Ok(FetchOutcome::Fetched(record))` - Novel assembled
    /// * `Err(HarvestError)` - Store lookup, detail fetch or title extraction failed
    pub async fn fetch_novel(
        &self,
        gate: &DedupeGate<'_>,
        url: &str,
    ) -> Result<FetchOutcome, HarvestError> {
        if gate.exists(url)? {
            tracing::info!("Novel already exists: {}", url);
            return Ok(FetchOutcome::Skipped);
        }

        self.fetch_record(url).await.map(FetchOutcome::Fetched)
    }

    /// Fetches and assembles a novel without consulting the store
    pub async fn fetch_record(&self, url: &str) -> Result<NovelRecord, HarvestError> {
        let html = self.transport.fetch(url).await?;

        let title = extract_title(&html).ok_or_else(|| HarvestError::Extraction {
            url: url.to_string(),
            field: "title",
        })?;
        let author = extract_author(&html).unwrap_or_else(|| {
            tracing::warn!("No author found for \"{}\"", title);
            String::new()
        });
        let intro = extract_intro(&html).unwrap_or_default();
        tracing::info!("Novel data gathered: {}", title);

        let links = extract_chapter_links(&html);
        tracing::info!("{} has {} chapters.", title, links.len());

        let chapters = self.fetch_chapters(url, &links).await;
        if chapters.len() < links.len() {
            tracing::warn!(
                "{}: {} of {} chapters could not be fetched",
                title,
                links.len() - chapters.len(),
                links.len()
            );
        }

        NovelRecord::assemble(&title, author, intro, url, chapters).ok_or_else(|| {
            HarvestError::Extraction {
                url: url.to_string(),
                field: "title",
            }
        })
    }

    /// Fetches chapters in index order, leaving out any that fail
    async fn fetch_chapters(&self, page_url: &str, links: &[ChapterLink]) -> Vec<ChapterRecord> {
        let base = Url::parse(page_url).ok();
        let total = links.len();
        let mut chapters = Vec::with_capacity(total);

        for link in links {
            let chapter_url = match &base {
                Some(base) => resolve_link(&link.url, base),
                None => Some(link.url.clone()),
            };
            let Some(chapter_url) = chapter_url else {
                tracing::warn!("{}: unusable chapter link {:?}", link.name, link.url);
                continue;
            };

            self.chapter_pacing.wait().await;

            let page = match self.transport.fetch(&chapter_url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("{}: {}", link.name, e);
                    continue;
                }
            };

            let Some(body) = extract_chapter_body(&page) else {
                tracing::error!("{} Find no content", link.name);
                continue;
            };

            chapters.push(ChapterRecord {
                name: link.name.clone(),
                body,
            });
            tracing::debug!(
                "Chapter {} finished. {}/{}",
                link.name,
                chapters.len(),
                total
            );
        }

        chapters
    }
}
