//! Adapters for the three admin-only network collections

use super::{created_within, matches_any, status_matches, truncate_subtitle, SearchContext};
use crate::error::Result;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search client brokers by name, description or country
pub async fn search_client_brokers(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let mut brokers = ctx.db.client_brokers.find(|broker| {
        broker.is_active
            && status_matches(ctx.filters, None)
            && created_within(ctx.filters, broker.created_at)
            && matches_any(
                pattern,
                [
                    Some(broker.name.as_str()),
                    broker.description.as_deref(),
                    broker.country.as_deref(),
                ],
            )
    });

    brokers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    brokers.truncate(limit);

    Ok(brokers
        .into_iter()
        .map(|broker| SearchResultItem {
            id: broker.id,
            kind: EntityKind::ClientBroker,
            title: broker.name.clone(),
            subtitle: broker
                .description
                .as_deref()
                .map(|text| truncate_subtitle(text, 80))
                .unwrap_or_default(),
            meta: json!({
                "country": broker.country,
                "createdAt": broker.created_at,
            }),
        })
        .collect())
}

/// Search client networks by name or description
pub async fn search_client_networks(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let mut networks = ctx.db.client_networks.find(|network| {
        network.is_active
            && status_matches(ctx.filters, None)
            && created_within(ctx.filters, network.created_at)
            && matches_any(
                pattern,
                [Some(network.name.as_str()), network.description.as_deref()],
            )
    });

    networks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    networks.truncate(limit);

    Ok(networks
        .into_iter()
        .map(|network| SearchResultItem {
            id: network.id,
            kind: EntityKind::ClientNetwork,
            title: network.name.clone(),
            subtitle: network
                .description
                .as_deref()
                .map(|text| truncate_subtitle(text, 80))
                .unwrap_or_default(),
            meta: json!({
                "createdAt": network.created_at,
            }),
        })
        .collect())
}

/// Search our networks by name or description
pub async fn search_our_networks(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let mut networks = ctx.db.our_networks.find(|network| {
        network.is_active
            && status_matches(ctx.filters, None)
            && created_within(ctx.filters, network.created_at)
            && matches_any(
                pattern,
                [Some(network.name.as_str()), network.description.as_deref()],
            )
    });

    networks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    networks.truncate(limit);

    Ok(networks
        .into_iter()
        .map(|network| SearchResultItem {
            id: network.id,
            kind: EntityKind::OurNetwork,
            title: network.name.clone(),
            subtitle: network
                .description
                .as_deref()
                .map(|text| truncate_subtitle(text, 80))
                .unwrap_or_default(),
            meta: json!({
                "assignedAffiliateManager": network.assigned_affiliate_manager,
                "createdAt": network.created_at,
            }),
        })
        .collect())
}
