//! Cross-entity global search core

pub mod adapters;
pub mod cache;
pub mod history;
pub mod policy;
pub mod query;
pub mod service;
pub mod types;

pub use cache::SearchCache;
pub use history::{ResultBreakdown, SearchHistoryEntry, SearchHistoryStore, SearchRecord};
pub use query::{ParsedQuery, QueryFilters};
pub use service::{SearchService, SortOrder};
pub use types::{EntityKind, SearchResultItem, TypeFilter};
