//! Harvest coordination
//!
//! The [`Harvester`] ties one novel's pipeline together: open a store for
//! this unit of work, skip if already stored, fetch, write the sidecar,
//! insert the row. Every error is turned into a per-URL
//! [`NovelOutcome::Failed`] so one bad novel never stops a batch.

use crate::config::{CategoryEntry, Config};
use crate::crawler::discovery::{search_novel, DiscoveryEnumerator, DiscoveryReport};
use crate::crawler::gate::DedupeGate;
use crate::crawler::novel::{FetchOutcome, NovelFetcher};
use crate::crawler::outcome::{NovelOutcome, SkipReason};
use crate::crawler::pacing::FixedDelay;
use crate::crawler::scheduler::DownloadScheduler;
use crate::crawler::transport::{HttpTransport, Transport};
use crate::output::SidecarWriter;
use crate::storage::{InsertOutcome, NovelStore, SqliteProvider, StoreProvider};
use crate::HarvestError;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Runs discovery and novel downloads against one source and one store
#[derive(Clone)]
pub struct Harvester {
    transport: Arc<dyn Transport>,
    fetcher: NovelFetcher,
    stores: Arc<dyn StoreProvider>,
    sidecars: SidecarWriter,
}

impl Harvester {
    pub fn new(
        transport: Arc<dyn Transport>,
        chapter_pacing: FixedDelay,
        stores: Arc<dyn StoreProvider>,
        sidecars: SidecarWriter,
    ) -> Self {
        Self {
            fetcher: NovelFetcher::new(Arc::clone(&transport), chapter_pacing),
            transport,
            stores,
            sidecars,
        }
    }

    /// Builds the HTTP transport, SQLite provider and sidecar writer from configuration
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let transport = HttpTransport::from_config(&config.user_agent, &config.http)?;

        Ok(Self::new(
            Arc::new(transport),
            FixedDelay::from_millis(config.pacing.chapter_delay_ms),
            Arc::new(SqliteProvider::new(&config.output.database_path)),
            SidecarWriter::new(&config.output.download_dir),
        ))
    }

    /// Opens a store handle owned by the caller
    pub fn open_store(&self) -> Result<Box<dyn NovelStore>, HarvestError> {
        Ok(self.stores.open()?)
    }

    /// Downloads and persists one novel
    ///
    /// Never returns an error: every failure becomes `NovelOutcome::Failed`.
    pub async fn download_novel(&self, url: &str) -> NovelOutcome {
        let started = Instant::now();

        match self.try_download(url).await {
            Ok(outcome) => {
                if let NovelOutcome::Persisted(record) = &outcome {
                    tracing::info!(
                        "Download {} finished in {:.2} minutes",
                        record.title,
                        started.elapsed().as_secs_f64() / 60.0
                    );
                }
                outcome
            }
            Err(e) => {
                tracing::error!("Download failed for {}: {}", url, e);
                NovelOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_download(&self, url: &str) -> Result<NovelOutcome, HarvestError> {
        let store = self.open_store()?;
        let gate = DedupeGate::new(store.as_ref());

        let record = match self.fetcher.fetch_novel(&gate, url).await? {
            FetchOutcome::Skipped => return Ok(NovelOutcome::Skipped(SkipReason::AlreadyStored)),
            FetchOutcome::Fetched(record) => record,
        };

        self.sidecars.write(&record).await?;

        match store.insert_novel(&record.document())? {
            InsertOutcome::Inserted(row_id) => {
                tracing::info!("Stored {} as row {}", record.title, row_id);
                Ok(NovelOutcome::Persisted(record))
            }
            InsertOutcome::Duplicate => {
                tracing::warn!("{} was stored by another worker first", url);
                Ok(NovelOutcome::Skipped(SkipReason::DuplicateInsert))
            }
        }
    }

    /// Runs a batch of URLs through `scheduler`
    pub async fn download_batch(
        &self,
        scheduler: &DownloadScheduler,
        urls: Vec<String>,
    ) -> Vec<(String, NovelOutcome)> {
        let harvester = self.clone();
        scheduler
            .run_batch(urls, move |url| {
                let harvester = harvester.clone();
                async move { harvester.download_novel(&url).await }
            })
            .await
    }

    /// Enumerates every category and replaces the stored snapshot
    pub async fn discover(&self, entries: &[CategoryEntry]) -> Result<DiscoveryReport, HarvestError> {
        let store = self.open_store()?;
        DiscoveryEnumerator::new(Arc::clone(&self.transport))
            .discover_all(entries, store.as_ref())
            .await
    }

    /// Every novel URL in the stored category snapshot, snapshot order
    pub fn known_urls(&self) -> Result<Vec<String>, HarvestError> {
        let store = self.open_store()?;
        let categories = store.load_categories()?;

        Ok(categories
            .iter()
            .flat_map(|category| category.novel_urls().map(str::to_string))
            .collect())
    }

    /// Finds a novel URL by exact title
    pub async fn search(&self, search_url: &str, title: &str) -> Result<Option<String>, HarvestError> {
        search_novel(self.transport.as_ref(), search_url, title).await
    }
}

/// Parses a URL list: one URL per line, blank lines and `#` comments ignored
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a URL list file
pub async fn read_url_file(path: &Path) -> Result<Vec<String>, HarvestError> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse_url_list(&text))
}
