//! Skin Log Common Library
//!
//! CLIと他のフロントエンドで共有される型と照合ロジック

pub mod types;
pub mod catalog;
pub mod matcher;
pub mod session;
pub mod entries;
pub mod error;
pub mod export;

pub use types::{CatalogRecord, CategoryTag, Entry, EntryDraft, Rating, Suggestion};
pub use catalog::Catalog;
pub use matcher::{classify, search, search_scored, ScoredCandidate, MAX_RESULTS, MIN_QUERY_CHARS};
pub use session::{SearchSession, SearchTicket};
pub use entries::{filter_entries, EntryFilter, SortBy};
pub use error::{Error, Result};
