use super::{created_within, matches_any, status_matches, truncate_subtitle, SearchContext};
use crate::error::Result;
use crate::models::Role;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search tickets by title, description or category
///
/// Non-admins only see tickets they created themselves.
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let own_only = ctx.role != Role::Admin;
    let requester = ctx.requester_id;

    let mut tickets = ctx.db.tickets.find(|ticket| {
        ticket.status != "deleted"
            && (!own_only || ticket.created_by == requester)
            && status_matches(ctx.filters, Some(&ticket.status))
            && created_within(ctx.filters, ticket.created_at)
            && matches_any(
                pattern,
                [
                    Some(ticket.title.as_str()),
                    Some(ticket.description.as_str()),
                    Some(ticket.category.as_str()),
                ],
            )
    });

    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tickets.truncate(limit);

    Ok(tickets
        .into_iter()
        .map(|ticket| SearchResultItem {
            id: ticket.id,
            kind: EntityKind::Ticket,
            title: ticket.title.clone(),
            subtitle: truncate_subtitle(&ticket.description, 80),
            meta: json!({
                "status": ticket.status,
                "priority": ticket.priority,
                "category": ticket.category,
                "createdAt": ticket.created_at,
            }),
        })
        .collect())
}
