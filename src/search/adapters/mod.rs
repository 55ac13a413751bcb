//! Per-entity search adapters
//!
//! Each adapter turns the compiled pattern plus structured filters into a
//! query against its own collection, narrows rows per the requester's role,
//! sorts by creation recency and projects into the uniform
//! `SearchResultItem` envelope.

pub mod announcement;
pub mod campaign;
pub mod lead;
pub mod networks;
pub mod order;
pub mod ticket;
pub mod user;

use crate::error::Result;
use crate::models::Role;
use crate::search::query::QueryFilters;
use crate::search::types::{EntityKind, SearchResultItem};
use crate::state::Database;
use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

/// Everything an adapter needs to execute one search
pub struct SearchContext<'a> {
    pub db: &'a Database,
    pub pattern: Option<&'a Regex>,
    pub filters: &'a QueryFilters,
    pub requester_id: Uuid,
    pub role: Role,
}

/// Dispatch one adapter
///
/// A `None` pattern short-circuits to an empty result: a filter-only query
/// has nothing to text-match, and the search paths treat that as "nothing to
/// search" rather than "return everything matching the filters".
pub async fn search(
    kind: EntityKind,
    ctx: &SearchContext<'_>,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let pattern = match ctx.pattern {
        Some(pattern) => pattern,
        None => return Ok(Vec::new()),
    };

    match kind {
        EntityKind::Lead => lead::search(ctx, pattern, limit).await,
        EntityKind::Order => order::search(ctx, pattern, limit).await,
        EntityKind::User => user::search(ctx, pattern, limit).await,
        EntityKind::Campaign => campaign::search(ctx, pattern, limit).await,
        EntityKind::Ticket => ticket::search(ctx, pattern, limit).await,
        EntityKind::Announcement => announcement::search(ctx, pattern, limit).await,
        EntityKind::ClientBroker => networks::search_client_brokers(ctx, pattern, limit).await,
        EntityKind::ClientNetwork => networks::search_client_networks(ctx, pattern, limit).await,
        EntityKind::OurNetwork => networks::search_our_networks(ctx, pattern, limit).await,
    }
}

/// True when any present field matches the pattern
pub(crate) fn matches_any<'a>(
    pattern: &Regex,
    fields: impl IntoIterator<Item = Option<&'a str>>,
) -> bool {
    fields
        .into_iter()
        .flatten()
        .any(|field| pattern.is_match(field))
}

/// Status equality against the entity's status field, if it has one
///
/// Document-store semantics: an equality filter on a field the document does
/// not carry matches nothing, so a `status:` directive empties results for
/// entities without a status.
pub(crate) fn status_matches(filters: &QueryFilters, entity_status: Option<&str>) -> bool {
    match &filters.status {
        None => true,
        Some(wanted) => entity_status
            .map(|status| status.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    }
}

/// Creation-date range filter, inclusive on both ends
pub(crate) fn created_within(filters: &QueryFilters, created_at: DateTime<Utc>) -> bool {
    let date = created_at.date_naive();
    if let Some(from) = filters.date_from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = filters.date_to {
        if date > to {
            return false;
        }
    }
    true
}

/// Shorten long body text for the subtitle slot
pub(crate) fn truncate_subtitle(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
