//! Pre-fetch existence check
//!
//! Asking the store before fetching is what makes re-running a batch cheap:
//! a URL already stored costs one lookup and no network traffic.

use crate::storage::NovelStore;
use crate::HarvestError;

/// Skips work for novels the store already holds
pub struct DedupeGate<'a> {
    store: &'a dyn NovelStore,
}

impl<'a> DedupeGate<'a> {
    pub fn new(store: &'a dyn NovelStore) -> Self {
        Self { store }
    }

    /// Whether a novel with this URL is already stored
    ///
    /// A failed lookup is `StoreUnavailable`, never "not found".
    pub fn exists(&self, url: &str) -> Result<bool, HarvestError> {
        self.store
            .exists_by_url(url)
            .map_err(HarvestError::StoreUnavailable)
    }
}
