//! Output module for persisted novels and run reports
//!
//! This module handles:
//! - Writing each novel's JSON sidecar file
//! - Summarizing a batch run
//! - Reporting store statistics

mod sidecar;
pub mod stats;
mod summary;

pub use sidecar::SidecarWriter;
pub use stats::{load_statistics, print_statistics, StoreStatistics};
pub use summary::{print_summary, BatchSummary};
