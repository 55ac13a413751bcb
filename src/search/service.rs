//! Search orchestration
//!
//! Parses the query once, resolves the adapter set through the access
//! policy, fans out to the entity adapters concurrently and merges the
//! results. Quick search returns cached, per-type buckets for live typing;
//! full search returns an uncached, sortable flat page for the results page.

use crate::config::SearchLimitsConfig;
use crate::error::Result;
use crate::models::Role;
use crate::search::adapters::{self, SearchContext};
use crate::search::cache::{cache_key, SearchCache};
use crate::search::history::{ResultBreakdown, SearchHistoryStore, SearchRecord};
use crate::search::policy;
use crate::search::query::{self, ParsedQuery, QueryFilters};
use crate::search::types::{EntityKind, SearchResultItem, TypeFilter};
use crate::state::Database;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Sort orders for full search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Adapter dispatch order; no scoring
    #[default]
    Relevance,
    /// Descending by creation date
    Date,
    /// Ascending by title
    Name,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortOrder::Relevance),
            "date" => Ok(SortOrder::Date),
            "name" => Ok(SortOrder::Name),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Per-type result buckets, all nine always present
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBuckets {
    pub leads: Vec<SearchResultItem>,
    pub orders: Vec<SearchResultItem>,
    pub users: Vec<SearchResultItem>,
    pub campaigns: Vec<SearchResultItem>,
    pub tickets: Vec<SearchResultItem>,
    pub announcements: Vec<SearchResultItem>,
    pub client_brokers: Vec<SearchResultItem>,
    pub client_networks: Vec<SearchResultItem>,
    pub our_networks: Vec<SearchResultItem>,
}

impl ResultBuckets {
    fn put(&mut self, kind: EntityKind, items: Vec<SearchResultItem>) {
        match kind {
            EntityKind::Lead => self.leads = items,
            EntityKind::Order => self.orders = items,
            EntityKind::User => self.users = items,
            EntityKind::Campaign => self.campaigns = items,
            EntityKind::Ticket => self.tickets = items,
            EntityKind::Announcement => self.announcements = items,
            EntityKind::ClientBroker => self.client_brokers = items,
            EntityKind::ClientNetwork => self.client_networks = items,
            EntityKind::OurNetwork => self.our_networks = items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickSearchResponse {
    success: bool,
    data: ResultBuckets,
    meta: QuickSearchMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickSearchMeta {
    query: String,
    parsed_query: ParsedQuery,
    total_results: u64,
    counts: ResultBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FullSearchResponse {
    success: bool,
    data: Vec<SearchResultItem>,
    meta: FullSearchMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FullSearchMeta {
    query: String,
    parsed_query: ParsedQuery,
    total_results: u64,
    counts: ResultBreakdown,
    pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: usize,
    limit: usize,
    total_pages: usize,
    has_more: bool,
}

/// Cross-entity search orchestrator
pub struct SearchService {
    db: Database,
    cache: Arc<SearchCache>,
    history: Arc<SearchHistoryStore>,
    limits: SearchLimitsConfig,
}

impl SearchService {
    pub fn new(
        db: Database,
        cache: Arc<SearchCache>,
        history: Arc<SearchHistoryStore>,
        limits: SearchLimitsConfig,
    ) -> Self {
        Self {
            db,
            cache,
            history,
            limits,
        }
    }

    pub fn history(&self) -> &Arc<SearchHistoryStore> {
        &self.history
    }

    /// Bucketed, capped, cached search for the live-typing dropdown
    pub async fn quick_search(
        &self,
        requester_id: Uuid,
        role: Role,
        raw_query: &str,
        limit: usize,
        types: &TypeFilter,
    ) -> Result<serde_json::Value> {
        let key = cache_key(requester_id, raw_query, limit, types);
        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!(query = raw_query, "Quick search cache hit");
            return Ok(payload);
        }

        let parsed = query::parse(raw_query);
        let pattern = parsed.pattern();
        let kinds = self.resolve_kinds(role, types, &parsed);

        let ctx = SearchContext {
            db: &self.db,
            pattern: pattern.as_ref(),
            filters: &parsed.filters,
            requester_id,
            role,
        };
        let outcomes =
            try_join_all(kinds.iter().map(|kind| adapters::search(*kind, &ctx, limit))).await?;

        let mut buckets = ResultBuckets::default();
        let mut counts = ResultBreakdown::default();
        let mut total_results = 0u64;
        for (kind, items) in kinds.iter().zip(outcomes) {
            let count = items.len() as u64;
            counts.set(*kind, count);
            total_results += count;
            buckets.put(*kind, items);
        }

        let payload = serde_json::to_value(QuickSearchResponse {
            success: true,
            data: buckets,
            meta: QuickSearchMeta {
                query: raw_query.to_string(),
                parsed_query: parsed.clone(),
                total_results,
                counts: counts.clone(),
            },
        })?;

        self.cache.set(key, payload.clone());
        self.record_history(requester_id, raw_query, parsed.filters, total_results, counts);

        tracing::debug!(query = raw_query, total_results, "Quick search executed");
        Ok(payload)
    }

    /// Paginated, sortable, uncached search for the results page
    pub async fn full_search(
        &self,
        requester_id: Uuid,
        role: Role,
        raw_query: &str,
        page: usize,
        limit: usize,
        types: &TypeFilter,
        sort: SortOrder,
    ) -> Result<serde_json::Value> {
        let parsed = query::parse(raw_query);
        let pattern = parsed.pattern();
        let kinds = self.resolve_kinds(role, types, &parsed);

        let ctx = SearchContext {
            db: &self.db,
            pattern: pattern.as_ref(),
            filters: &parsed.filters,
            requester_id,
            role,
        };
        let overfetch = self.limits.full_overfetch_limit;
        let outcomes = try_join_all(
            kinds
                .iter()
                .map(|kind| adapters::search(*kind, &ctx, overfetch)),
        )
        .await?;

        let mut counts = ResultBreakdown::default();
        let mut flattened = Vec::new();
        for (kind, items) in kinds.iter().zip(outcomes) {
            counts.set(*kind, items.len() as u64);
            flattened.extend(items);
        }
        let total_results = flattened.len();

        match sort {
            // Relevance is the adapter dispatch order the flatten produced
            SortOrder::Relevance => {}
            SortOrder::Date => {
                flattened.sort_by_key(|item| std::cmp::Reverse(item_created_at(item)));
            }
            SortOrder::Name => flattened.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        let start = (page - 1) * limit;
        let end = start + limit;
        let has_more = end < total_results;
        let total_pages = total_results.div_ceil(limit);
        let data: Vec<SearchResultItem> = flattened
            .into_iter()
            .skip(start)
            .take(limit)
            .collect();

        let payload = serde_json::to_value(FullSearchResponse {
            success: true,
            data,
            meta: FullSearchMeta {
                query: raw_query.to_string(),
                parsed_query: parsed.clone(),
                total_results: total_results as u64,
                counts: counts.clone(),
                pagination: Pagination {
                    page,
                    limit,
                    total_pages,
                    has_more,
                },
            },
        })?;

        self.record_history(
            requester_id,
            raw_query,
            parsed.filters,
            total_results as u64,
            counts,
        );

        tracing::debug!(query = raw_query, total_results, page, "Full search executed");
        Ok(payload)
    }

    /// Resolve the adapter set: role-permitted kinds intersected with the
    /// explicit type restriction. The `types` parameter and in-query `type:`
    /// directives are merged first; a restriction made entirely of unknown
    /// tags dispatches nothing rather than widening back to every permitted
    /// kind.
    fn resolve_kinds(
        &self,
        role: Role,
        types: &TypeFilter,
        parsed: &ParsedQuery,
    ) -> Vec<EntityKind> {
        let mut filter = types.clone();
        for tag in &parsed.filters.types {
            filter.add_tag(tag);
        }
        if !filter.is_restricted() {
            return policy::permitted_kinds(role);
        }
        policy::resolve_kinds(role, filter.kinds())
    }

    /// Dispatch the history write without awaiting it; failures are logged
    /// and swallowed, never surfaced to the caller
    fn record_history(
        &self,
        user: Uuid,
        raw_query: &str,
        filters: QueryFilters,
        result_count: u64,
        result_breakdown: ResultBreakdown,
    ) {
        let history = Arc::clone(&self.history);
        let record = SearchRecord {
            query: raw_query.to_string(),
            filters,
            result_count,
            result_breakdown,
        };
        tokio::spawn(async move {
            if let Err(error) = history.add_search(user, record).await {
                tracing::warn!(%error, "Failed to record search history");
            }
        });
    }
}

/// `meta.createdAt` as a timestamp, epoch when missing or unparseable
fn item_created_at(item: &SearchResultItem) -> DateTime<Utc> {
    item.meta
        .get("createdAt")
        .and_then(|value| value.as_str())
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, HistoryConfig};
    use crate::models::{Lead, Role, Ticket, User};
    use std::time::Duration;

    fn service_with(db: Database) -> SearchService {
        let cache = Arc::new(SearchCache::from_config(&CacheConfig::default()));
        let history = Arc::new(SearchHistoryStore::new(HistoryConfig::default()));
        SearchService::new(db, cache, history, SearchLimitsConfig::default())
    }

    fn types(tags: &[&str]) -> TypeFilter {
        let mut filter = TypeFilter::default();
        for tag in tags {
            filter.add_tag(tag);
        }
        filter
    }

    fn seeded_db() -> (Database, Uuid) {
        let db = Database::new();

        let agent = User::new("Agent Jones", "jones@example.com", Role::Agent);
        let agent_id = agent.id;
        db.users.insert(agent_id, agent);

        let admin = User::new("John Carter", "carter@example.com", Role::Admin);
        db.users.insert(admin.id, admin);

        let mut mine = Lead::new("Anna", "Smith", "anna@example.com", "+1555100", "US");
        mine.assigned_agent = Some(agent_id);
        db.leads.insert(mine.id, mine);

        let other = Lead::new("Bob", "Smith", "bob@example.com", "+1555101", "US");
        db.leads.insert(other.id, other);

        let ticket = Ticket::new("Smith payout", "Payout for smith leads", "salary_issue", agent_id);
        db.tickets.insert(ticket.id, ticket);

        (db, agent_id)
    }

    #[tokio::test]
    async fn test_agent_only_sees_permitted_buckets_and_own_leads() {
        let (db, agent_id) = seeded_db();
        let service = service_with(db);

        let payload = service
            .quick_search(agent_id, Role::Agent, "smith", 5, &TypeFilter::default())
            .await
            .unwrap();

        // Only the agent's own lead matches, despite two "Smith" leads
        let leads = payload["data"]["leads"].as_array().unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0]["title"], "Anna Smith");

        // Entity kinds outside the agent's scope stay empty
        assert!(payload["data"]["users"].as_array().unwrap().is_empty());
        assert!(payload["data"]["orders"].as_array().unwrap().is_empty());
        assert_eq!(payload["data"]["tickets"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_type_filter_never_widens_access() {
        let (db, agent_id) = seeded_db();
        let service = service_with(db);

        let payload = service
            .quick_search(agent_id, Role::Agent, "john", 5, &types(&["user"]))
            .await
            .unwrap();

        assert!(payload["data"]["users"].as_array().unwrap().is_empty());
        assert_eq!(payload["meta"]["totalResults"], 0);
    }

    #[tokio::test]
    async fn test_admin_explicit_type_dispatches_single_adapter() {
        let (db, _) = seeded_db();
        let admin_id = Uuid::new_v4();
        let service = service_with(db);

        let payload = service
            .quick_search(admin_id, Role::Admin, "john type:user", 5, &TypeFilter::default())
            .await
            .unwrap();

        let users = payload["data"]["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["title"], "John Carter");
        assert!(payload["data"]["leads"].as_array().unwrap().is_empty());
        assert_eq!(payload["meta"]["counts"]["users"], 1);
        assert_eq!(payload["meta"]["totalResults"], 1);
    }

    #[tokio::test]
    async fn test_unknown_type_directive_restricts_to_nothing() {
        let (db, _) = seeded_db();
        let admin_id = Uuid::new_v4();
        let service = service_with(db);

        let payload = service
            .quick_search(
                admin_id,
                Role::Admin,
                "john type:bogus",
                5,
                &TypeFilter::default(),
            )
            .await
            .unwrap();

        // A restriction made entirely of unknown tags matches nothing; it
        // must not fall back to searching every permitted kind
        assert_eq!(payload["meta"]["totalResults"], 0);
        assert!(payload["data"]["users"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_types_param_restricts_to_nothing() {
        let (db, _) = seeded_db();
        let admin_id = Uuid::new_v4();
        let service = service_with(db);

        let payload = service
            .quick_search(admin_id, Role::Admin, "john", 5, &types(&["bogus"]))
            .await
            .unwrap();
        assert_eq!(payload["meta"]["totalResults"], 0);
    }

    #[tokio::test]
    async fn test_unknown_tags_do_not_drop_recognized_ones() {
        let (db, _) = seeded_db();
        let admin_id = Uuid::new_v4();
        let service = service_with(db);

        let payload = service
            .quick_search(admin_id, Role::Admin, "john", 5, &types(&["bogus", "user"]))
            .await
            .unwrap();
        assert_eq!(payload["data"]["users"].as_array().unwrap().len(), 1);
        assert_eq!(payload["meta"]["totalResults"], 1);
    }

    #[tokio::test]
    async fn test_quick_search_cache_idempotence() {
        let (db, agent_id) = seeded_db();
        let service = service_with(db);

        let first = service
            .quick_search(agent_id, Role::Agent, "smith", 5, &TypeFilter::default())
            .await
            .unwrap();
        let second = service
            .quick_search(agent_id, Role::Agent, "smith", 5, &TypeFilter::default())
            .await
            .unwrap();
        assert_eq!(first, second);

        // Let the fire-and-forget history writes settle; dedup collapses
        // the repeat into one entry
        tokio::time::sleep(Duration::from_millis(50)).await;
        let history = service.history().user_history(agent_id, 20).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_filter_only_query_returns_nothing() {
        let (db, agent_id) = seeded_db();
        let service = service_with(db);

        let payload = service
            .quick_search(agent_id, Role::Agent, "status:active", 5, &TypeFilter::default())
            .await
            .unwrap();

        assert_eq!(payload["meta"]["totalResults"], 0);
        assert!(payload["data"]["leads"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_search_pagination_is_stable_slice() {
        let db = Database::new();
        let admin_id = Uuid::new_v4();
        for i in 0..7 {
            let lead = Lead::new(
                format!("Lead{i}"),
                "Paging",
                format!("lead{i}@example.com"),
                "+1555200",
                "US",
            );
            db.leads.insert(lead.id, lead);
        }
        let service = service_with(db);

        let all = service
            .full_search(admin_id, Role::Admin, "paging", 1, 50, &TypeFilter::default(), SortOrder::Name)
            .await
            .unwrap();
        let everything = all["data"].as_array().unwrap().clone();
        assert_eq!(everything.len(), 7);
        assert!(!all["meta"]["pagination"]["hasMore"].as_bool().unwrap());

        let page2 = service
            .full_search(admin_id, Role::Admin, "paging", 2, 3, &TypeFilter::default(), SortOrder::Name)
            .await
            .unwrap();
        let items = page2["data"].as_array().unwrap();
        assert_eq!(items.as_slice(), &everything[3..6]);
        assert!(page2["meta"]["pagination"]["hasMore"].as_bool().unwrap());
        assert_eq!(page2["meta"]["pagination"]["totalPages"], 3);

        let page3 = service
            .full_search(admin_id, Role::Admin, "paging", 3, 3, &TypeFilter::default(), SortOrder::Name)
            .await
            .unwrap();
        assert_eq!(page3["data"].as_array().unwrap().len(), 1);
        assert!(!page3["meta"]["pagination"]["hasMore"].as_bool().unwrap());
    }

    #[tokio::test]
    async fn test_full_search_date_sort_descending() {
        let db = Database::new();
        let admin_id = Uuid::new_v4();
        for i in 0..3 {
            let mut lead = Lead::new(
                format!("Dated{i}"),
                "Sortable",
                format!("dated{i}@example.com"),
                "+1555300",
                "US",
            );
            lead.created_at = Utc::now() - chrono::Duration::days(i);
            db.leads.insert(lead.id, lead);
        }
        let service = service_with(db);

        let payload = service
            .full_search(admin_id, Role::Admin, "sortable", 1, 10, &TypeFilter::default(), SortOrder::Date)
            .await
            .unwrap();
        let titles: Vec<&str> = payload["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Dated0 Sortable", "Dated1 Sortable", "Dated2 Sortable"]);
    }
}
