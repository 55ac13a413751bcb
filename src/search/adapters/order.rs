use super::{created_within, status_matches, SearchContext};
use crate::error::Result;
use crate::models::Role;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Over-fetch cap for the in-memory match phase
const CANDIDATE_LIMIT: usize = 100;

/// Search orders by order number, requester name, campaign name or country
///
/// Unlike the other adapters there is no storage-level text predicate: the
/// order number is derived from the id and the requester/campaign names live
/// in other collections, so the adapter pulls up to 100 recent candidates,
/// populates the display names and pattern-matches in memory. Known
/// performance trade-off, kept deliberately.
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let own_only = ctx.role == Role::AffiliateManager;
    let requester = ctx.requester_id;

    let mut candidates = ctx.db.orders.find(|order| {
        order.status != "cancelled"
            && (!own_only || order.requester == requester)
            && status_matches(ctx.filters, Some(&order.status))
            && created_within(ctx.filters, order.created_at)
    });

    candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    candidates.truncate(CANDIDATE_LIMIT);

    let mut results = Vec::new();
    for order in candidates {
        if results.len() >= limit {
            break;
        }

        let requester_name = ctx
            .db
            .users
            .get(&order.requester)
            .map(|user| user.full_name)
            .unwrap_or_else(|| "Unknown Requester".to_string());
        let campaign_name = order
            .campaign
            .and_then(|id| ctx.db.campaigns.get(&id))
            .map(|campaign| campaign.name);

        let id_text = order.id.simple().to_string();
        let matched = pattern.is_match(&id_text)
            || pattern.is_match(&requester_name)
            || campaign_name
                .as_deref()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false)
            || order
                .country_filter
                .as_deref()
                .map(|country| pattern.is_match(country))
                .unwrap_or(false);
        if !matched {
            continue;
        }

        results.push(SearchResultItem {
            id: order.id,
            kind: EntityKind::Order,
            title: format!("Order #{}", order.short_id()),
            subtitle: requester_name,
            meta: json!({
                "status": order.status,
                "country": order.country_filter,
                "campaign": campaign_name,
                "requests": order.requests,
                "fulfilled": order.fulfilled,
                "plannedDate": order.planned_date,
                "createdAt": order.created_at,
            }),
        });
    }

    Ok(results)
}
