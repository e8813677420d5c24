//! Crawler module for discovering and fetching novels
//!
//! This module contains the core harvesting logic, including:
//! - HTTP transport and error classification
//! - Pattern-based extraction of titles, chapters and listings
//! - Category discovery and title search
//! - Per-novel fetching behind the store existence check
//! - Batch scheduling and overall coordination

mod coordinator;
mod discovery;
mod extractor;
mod gate;
mod novel;
mod outcome;
mod pacing;
mod scheduler;
mod transport;

#[cfg(test)]
mod test_support;

pub use coordinator::{parse_url_list, read_url_file, Harvester};
pub use discovery::{search_novel, CategoryFailure, DiscoveryEnumerator, DiscoveryReport};
pub use extractor::{
    extract_author, extract_category_novel_links, extract_chapter_body, extract_chapter_links,
    extract_intro, extract_search_results, extract_title, is_chapter_name, resolve_link,
    ChapterLink, SearchHit,
};
pub use gate::DedupeGate;
pub use novel::{FetchOutcome, NovelFetcher};
pub use outcome::{NovelOutcome, SkipReason};
pub use pacing::FixedDelay;
pub use scheduler::{BatchOptions, DownloadScheduler};
pub use transport::{build_http_client, user_agent_string, HttpTransport, Transport, TransportError};
