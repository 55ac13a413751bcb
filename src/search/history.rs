//! Per-user search history
//!
//! Every executed search is recorded asynchronously. Repeats of the same
//! query within the dedup window update the existing entry in place instead
//! of inserting a new row, and each user keeps at most the configured number
//! of entries (oldest dropped first).

use crate::config::HistoryConfig;
use crate::error::{AppError, Result};
use crate::search::query::QueryFilters;
use crate::search::types::EntityKind;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-type result counts for one recorded search
///
/// Every key is always present (defaulting to 0) so entries written by older
/// engine versions deserialize cleanly when new entity types appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBreakdown {
    #[serde(default)]
    pub leads: u64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub campaigns: u64,
    #[serde(default)]
    pub tickets: u64,
    #[serde(default)]
    pub announcements: u64,
    #[serde(default)]
    pub client_brokers: u64,
    #[serde(default)]
    pub client_networks: u64,
    #[serde(default)]
    pub our_networks: u64,
}

impl ResultBreakdown {
    pub fn set(&mut self, kind: EntityKind, count: u64) {
        match kind {
            EntityKind::Lead => self.leads = count,
            EntityKind::Order => self.orders = count,
            EntityKind::User => self.users = count,
            EntityKind::Campaign => self.campaigns = count,
            EntityKind::Ticket => self.tickets = count,
            EntityKind::Announcement => self.announcements = count,
            EntityKind::ClientBroker => self.client_brokers = count,
            EntityKind::ClientNetwork => self.client_networks = count,
            EntityKind::OurNetwork => self.our_networks = count,
        }
    }

    pub fn total(&self) -> u64 {
        self.leads
            + self.orders
            + self.users
            + self.campaigns
            + self.tickets
            + self.announcements
            + self.client_brokers
            + self.client_networks
            + self.our_networks
    }
}

/// One persisted history row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub user: Uuid,

    pub query: String,

    pub filters: QueryFilters,

    pub result_count: u64,

    pub result_breakdown: ResultBreakdown,

    pub searched_at: DateTime<Utc>,
}

/// Payload recorded for one executed search
#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub query: String,
    pub filters: QueryFilters,
    pub result_count: u64,
    pub result_breakdown: ResultBreakdown,
}

/// In-process history store keyed by user
pub struct SearchHistoryStore {
    entries: DashMap<Uuid, Vec<SearchHistoryEntry>>,
    config: HistoryConfig,
}

impl SearchHistoryStore {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    /// Record one search, deduplicating recent repeats and enforcing the
    /// per-user retention cap
    pub async fn add_search(&self, user: Uuid, record: SearchRecord) -> Result<()> {
        let mut query = record.query.trim().to_string();
        if query.chars().count() > self.config.max_query_len {
            query = query.chars().take(self.config.max_query_len).collect();
        }

        let now = Utc::now();
        let window_start = now - Duration::seconds(self.config.dedup_window_secs);
        let mut user_entries = self.entries.entry(user).or_default();

        // Same query within the window: refresh in place, no new row
        if let Some(existing) = user_entries
            .iter_mut()
            .find(|entry| entry.query == query && entry.searched_at >= window_start)
        {
            existing.searched_at = now;
            existing.result_count = record.result_count;
            existing.result_breakdown = record.result_breakdown;
            existing.filters = record.filters;
            return Ok(());
        }

        user_entries.push(SearchHistoryEntry {
            id: Uuid::new_v4(),
            user,
            query,
            filters: record.filters,
            result_count: record.result_count,
            result_breakdown: record.result_breakdown,
            searched_at: now,
        });

        // Retention: drop the oldest entries beyond the cap
        if user_entries.len() > self.config.max_entries_per_user {
            user_entries.sort_by_key(|entry| entry.searched_at);
            let excess = user_entries.len() - self.config.max_entries_per_user;
            user_entries.drain(..excess);
        }

        Ok(())
    }

    /// Most entries a history read should return
    pub fn page_limit(&self) -> usize {
        self.config.max_entries_per_user
    }

    /// The user's most recent entries, newest first
    pub async fn user_history(&self, user: Uuid, limit: usize) -> Result<Vec<SearchHistoryEntry>> {
        let mut entries = self
            .entries
            .get(&user)
            .map(|list| list.clone())
            .unwrap_or_default();
        entries.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Delete one entry owned by the user
    pub async fn delete_entry(&self, user: Uuid, entry_id: Uuid) -> Result<()> {
        let mut user_entries = self
            .entries
            .get_mut(&user)
            .ok_or_else(|| AppError::NotFound(format!("History entry {entry_id} not found")))?;

        let before = user_entries.len();
        user_entries.retain(|entry| entry.id != entry_id);
        if user_entries.len() == before {
            return Err(AppError::NotFound(format!(
                "History entry {entry_id} not found"
            )));
        }
        Ok(())
    }

    /// Remove all of the user's history; returns how many rows were deleted
    pub async fn clear(&self, user: Uuid) -> Result<usize> {
        Ok(self
            .entries
            .remove(&user)
            .map(|(_, list)| list.len())
            .unwrap_or(0))
    }
}
