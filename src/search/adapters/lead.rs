use super::{created_within, matches_any, status_matches, SearchContext};
use crate::error::Result;
use crate::models::Role;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search leads by name, contact fields, country, campaign, broker or source
///
/// Agents only see leads assigned to them; archived leads never surface.
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let agent_only = ctx.role == Role::Agent;
    let requester = ctx.requester_id;

    let mut leads = ctx.db.leads.find(|lead| {
        !lead.is_archived
            && (!agent_only || lead.assigned_agent == Some(requester))
            && status_matches(ctx.filters, Some(&lead.status))
            && created_within(ctx.filters, lead.created_at)
            && matches_any(
                pattern,
                [
                    Some(lead.first_name.as_str()),
                    Some(lead.last_name.as_str()),
                    Some(lead.new_email.as_str()),
                    lead.old_email.as_deref(),
                    Some(lead.new_phone.as_str()),
                    lead.old_phone.as_deref(),
                    Some(lead.country.as_str()),
                    lead.campaign.as_deref(),
                    lead.client_broker.as_deref(),
                    lead.source.as_deref(),
                ],
            )
    });

    leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    leads.truncate(limit);

    Ok(leads
        .into_iter()
        .map(|lead| SearchResultItem {
            id: lead.id,
            kind: EntityKind::Lead,
            title: format!("{} {}", lead.first_name, lead.last_name),
            subtitle: lead.new_email.clone(),
            meta: json!({
                "country": lead.country,
                "leadType": lead.lead_type,
                "status": lead.status,
                "phone": lead.new_phone,
                "createdAt": lead.created_at,
            }),
        })
        .collect())
}
