use super::{created_within, matches_any, status_matches, truncate_subtitle, SearchContext};
use crate::error::Result;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search campaigns by name or description
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let mut campaigns = ctx.db.campaigns.find(|campaign| {
        campaign.is_active
            && status_matches(ctx.filters, Some(&campaign.status))
            && created_within(ctx.filters, campaign.created_at)
            && matches_any(
                pattern,
                [
                    Some(campaign.name.as_str()),
                    campaign.description.as_deref(),
                ],
            )
    });

    campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    campaigns.truncate(limit);

    Ok(campaigns
        .into_iter()
        .map(|campaign| SearchResultItem {
            id: campaign.id,
            kind: EntityKind::Campaign,
            title: campaign.name.clone(),
            subtitle: campaign
                .description
                .as_deref()
                .map(|text| truncate_subtitle(text, 80))
                .unwrap_or_default(),
            meta: json!({
                "status": campaign.status,
                "country": campaign.country,
                "createdAt": campaign.created_at,
            }),
        })
        .collect())
}
