//! Data model for harvested novels
//!
//! # Components
//!
//! - `NovelListing` / `Category`: lightweight references produced by discovery
//! - `ChapterRecord` / `NovelRecord`: the assembled result of one novel fetch
//! - `fingerprint`: the stable identifier derived from a novel's title

mod category;
mod identity;
mod novel;

pub use category::{Category, NovelListing};
pub use identity::fingerprint;
pub use novel::{ChapterRecord, NovelDocument, NovelRecord};
