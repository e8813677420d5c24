//! End-of-batch summary

use crate::crawler::{NovelOutcome, SkipReason};

/// Tally of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub persisted: usize,
    pub already_stored: usize,
    pub duplicate_inserts: usize,
    /// Failed URLs with their reasons, in completion order
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn from_results(results: &[(String, NovelOutcome)]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for (url, outcome) in results {
            match outcome {
                NovelOutcome::Persisted(_) => summary.persisted += 1,
                NovelOutcome::Skipped(SkipReason::AlreadyStored) => summary.already_stored += 1,
                NovelOutcome::Skipped(SkipReason::DuplicateInsert) => {
                    summary.duplicate_inserts += 1
                }
                NovelOutcome::Failed(reason) => {
                    summary.failures.push((url.clone(), reason.clone()))
                }
            }
        }

        summary
    }

    pub fn skipped(&self) -> usize {
        self.already_stored + self.duplicate_inserts
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &BatchSummary) {
    println!("=== Batch Summary ===\n");
    println!("  URLs processed: {}", summary.total);
    println!("  Persisted: {}", summary.persisted);
    println!(
        "  Skipped: {} ({} already stored, {} stored concurrently)",
        summary.skipped(),
        summary.already_stored,
        summary.duplicate_inserts
    );
    println!("  Failed: {}", summary.failures.len());

    if !summary.failures.is_empty() {
        println!("\nFailures (re-run to retry):");
        for (url, reason) in &summary.failures {
            println!("  - {}: {}", url, reason);
        }
    }
}
