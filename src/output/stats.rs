//! Statistics from the novel store
//!
//! Backs the `--stats` mode: how many novels are stored and what the last
//! discovery snapshot looked like.

use crate::storage::NovelStore;
use crate::HarvestError;

/// Store statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Number of stored novels
    pub total_novels: u64,

    /// Category titles with their listed novel counts, snapshot order
    pub categories: Vec<(String, usize)>,
}

impl StoreStatistics {
    /// Novels listed across the whole category snapshot
    pub fn listed_novels(&self) -> usize {
        self.categories.iter().map(|(_, count)| count).sum()
    }
}

/// Loads statistics from the store
pub fn load_statistics(store: &dyn NovelStore) -> Result<StoreStatistics, HarvestError> {
    let total_novels = store.count_novels()?;
    let categories = store
        .load_categories()?
        .into_iter()
        .map(|category| (category.title, category.novels.len()))
        .collect();

    Ok(StoreStatistics {
        total_novels,
        categories,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Store Statistics ===\n");

    println!("Overview:");
    println!("  Stored novels: {}", stats.total_novels);
    println!("  Listed in last discovery: {}", stats.listed_novels());
    println!();

    if stats.categories.is_empty() {
        println!("No category snapshot yet (run with --discover).");
        return;
    }

    println!("Categories ({}):", stats.categories.len());
    for (title, count) in &stats.categories {
        println!("  {}: {}", title, count);
    }
}
